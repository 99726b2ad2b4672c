//! Login policy derived from the `admin` config section.

use std::fmt;

use chrono::TimeDelta;
use folio_config::AdminConfig;

#[derive(Clone)]
pub struct AuthSettings {
    /// Username used when no override is stored.
    pub username: String,
    /// Password used when no override is stored.
    pub password: String,
    pub max_attempts: u32,
    pub lockout: TimeDelta,
    pub session: TimeDelta,
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .field("max_attempts", &self.max_attempts)
            .field("lockout", &self.lockout)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn seconds(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

impl AuthSettings {
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            max_attempts: config.max_attempts.max(1),
            lockout: seconds(config.lockout_secs),
            session: seconds(config.session_secs),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self::from_config(&AdminConfig::default())
    }
}
