//! Idle-timeout configuration for the admin session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Warn after 25 seconds without activity.
const fn default_warning_ms() -> u64 {
    25_000
}

/// Log out after 30 seconds without activity.
const fn default_timeout_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdleConfig {
    /// Delay from the last activity until the warning fires.
    #[serde(default = "default_warning_ms")]
    pub warning_ms: u64,

    /// Delay from the last activity until the session is closed.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            warning_ms: default_warning_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl IdleConfig {
    pub const fn warning(&self) -> Duration {
        Duration::from_millis(self.warning_ms)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The warning must fire strictly before the timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warning_ms >= self.timeout_ms {
            return Err(ConfigError::InvalidValue {
                field: "idle.warning_ms".into(),
                reason: format!(
                    "must be less than idle.timeout_ms ({} >= {})",
                    self.warning_ms, self.timeout_ms
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = IdleConfig::default();
        assert_eq!(config.warning(), Duration::from_secs(25));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn warning_must_precede_timeout() {
        let config = IdleConfig {
            warning_ms: 10_000,
            timeout_ms: 10_000,
        };
        assert!(config.validate().is_err());
    }
}
