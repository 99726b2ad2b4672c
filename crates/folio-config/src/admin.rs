//! Admin login configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "admin123".to_string()
}

const fn default_max_attempts() -> u32 {
    3
}

/// Lockout after too many failures: five minutes.
const fn default_lockout_secs() -> u64 {
    5 * 60
}

/// Session lifetime: two hours.
const fn default_session_secs() -> u64 {
    2 * 60 * 60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_username")]
    pub username: String,

    /// Fallback password, used until one is set through the reset flow.
    #[serde(default = "default_password")]
    pub password: String,

    /// Consecutive failures allowed before lockout.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: u64,

    #[serde(default = "default_session_secs")]
    pub session_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            max_attempts: default_max_attempts(),
            lockout_secs: default_lockout_secs(),
            session_secs: default_session_secs(),
        }
    }
}

impl AdminConfig {
    pub const fn lockout(&self) -> Duration {
        Duration::from_secs(self.lockout_secs)
    }

    pub const fn session_duration(&self) -> Duration {
        Duration::from_secs(self.session_secs)
    }

    /// Reject settings that would make login impossible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "admin.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.session_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "admin.session_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
