//! Project identifiers.
//!
//! The hosted table assigns bigint ids (or UUIDs, depending on the schema);
//! projects persisted only locally get a millisecond timestamp id. Both
//! shapes round-trip through [`ProjectId`].

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opaque project identifier: an integer or a text id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ProjectId {
    Numeric(i64),
    Text(String),
}

impl ProjectId {
    /// Parse user input: integers become [`ProjectId::Numeric`], anything
    /// else is kept verbatim (trimmed) as text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Numeric)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProjectId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Synthesize an id for a project persisted only to the local store.
///
/// Uses the millisecond timestamp of `now`, bumped forward until it does not
/// collide with any id in `taken`.
#[must_use]
pub fn synthesize_local_id<'a>(
    now: DateTime<Utc>,
    taken: impl IntoIterator<Item = &'a ProjectId> + Clone,
) -> ProjectId {
    let mut candidate = now.timestamp_millis();
    while taken
        .clone()
        .into_iter()
        .any(|id| *id == ProjectId::Numeric(candidate))
    {
        candidate += 1;
    }
    ProjectId::Numeric(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_prefers_numeric() {
        assert_eq!(ProjectId::parse("42"), ProjectId::Numeric(42));
        assert_eq!(ProjectId::parse(" 7 "), ProjectId::Numeric(7));
        assert_eq!(
            ProjectId::parse("9b2e-uuid"),
            ProjectId::Text("9b2e-uuid".into())
        );
    }

    #[test]
    fn deserializes_number_and_string() {
        let n: ProjectId = serde_json::from_str("12").unwrap();
        let s: ProjectId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(n, ProjectId::Numeric(12));
        assert_eq!(s, ProjectId::Text("abc".into()));
        assert_eq!(serde_json::to_string(&n).unwrap(), "12");
    }

    #[test]
    fn local_id_skips_taken_values() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let taken = vec![
            ProjectId::Numeric(1_700_000_000_000),
            ProjectId::Numeric(1_700_000_000_001),
            ProjectId::Text("1700000000002".into()),
        ];
        assert_eq!(
            synthesize_local_id(now, &taken),
            ProjectId::Numeric(1_700_000_000_002)
        );
    }

    #[test]
    fn local_id_uses_timestamp_when_free() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_500).unwrap();
        assert_eq!(
            synthesize_local_id(now, &Vec::new()),
            ProjectId::Numeric(1_700_000_000_500)
        );
    }
}
