use chrono::{DateTime, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The admin session record kept in the local store.
///
/// Wire names and millisecond timestamps match the record the site stored
/// under `adminSession`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    #[serde(rename = "isLoggedIn")]
    pub active: bool,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    #[schemars(with = "i64")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "expiresAt", with = "chrono::serde::ts_milliseconds")]
    #[schemars(with = "i64")]
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Open a session at `now` lasting `duration`.
    #[must_use]
    pub fn start(now: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self {
            active: true,
            started_at: now,
            expires_at: now + duration,
        }
    }

    /// A session is active only while `now` is strictly before its expiry.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active && now < self.expires_at
    }

    /// Time left before expiry, or `None` once inactive.
    #[must_use]
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.is_active_at(now).then(|| self.expires_at - now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn active_strictly_before_expiry() {
        let session = Session::start(at(1_000), TimeDelta::milliseconds(500));
        assert!(session.is_active_at(at(1_499)));
        assert!(!session.is_active_at(at(1_500)));
        assert_eq!(
            session.remaining_at(at(1_200)),
            Some(TimeDelta::milliseconds(300))
        );
        assert_eq!(session.remaining_at(at(2_000)), None);
    }

    #[test]
    fn wire_format_uses_millisecond_timestamps() {
        let session = Session::start(at(1_700_000_000_000), TimeDelta::hours(2));
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["isLoggedIn"], true);
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["expiresAt"], 1_700_007_200_000_i64);
    }
}
