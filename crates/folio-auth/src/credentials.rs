//! Admin credential override stored under `adminCredentials`.

use std::fmt;

use folio_core::validation::validate_password;
use folio_store::{LocalStorageError, LocalStore, keys};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AdminCredentials {
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Resolves the credentials in force: a stored override wins field by
/// field over the configured fallback.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    local: LocalStore,
    fallback: AdminCredentials,
}

impl CredentialStore {
    #[must_use]
    pub const fn new(local: LocalStore, fallback: AdminCredentials) -> Self {
        Self { local, fallback }
    }

    #[must_use]
    pub fn effective(&self) -> AdminCredentials {
        let stored: Option<AdminCredentials> = self.local.load_opt(keys::ADMIN_CREDENTIALS);
        let Some(stored) = stored else {
            return self.fallback.clone();
        };
        AdminCredentials {
            username: non_empty_or(stored.username, &self.fallback.username),
            password: non_empty_or(stored.password, &self.fallback.password),
        }
    }

    /// Store `new_password` as the override for the configured username.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidPassword`] if the password is too short,
    /// [`AuthError::Storage`] if the override cannot be written.
    pub fn reset_password(&self, new_password: &str) -> Result<(), AuthError> {
        validate_password(new_password)?;
        let credentials = AdminCredentials {
            username: self.fallback.username.clone(),
            password: new_password.to_string(),
        };
        if !self.local.save(keys::ADMIN_CREDENTIALS, &credentials) {
            return Err(LocalStorageError {
                key: keys::ADMIN_CREDENTIALS.to_string(),
            }
            .into());
        }
        tracing::info!(username = %credentials.username, "admin password replaced");
        Ok(())
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> CredentialStore {
        CredentialStore::new(
            LocalStore::in_memory(),
            AdminCredentials {
                username: "admin".into(),
                password: "admin123".into(),
            },
        )
    }

    #[test]
    fn fallback_applies_without_override() {
        assert!(store().effective().matches("admin", "admin123"));
    }

    #[test]
    fn reset_overrides_password_only() {
        let store = store();
        store.reset_password("hunter22").unwrap();
        let effective = store.effective();
        assert_eq!(effective.username, "admin");
        assert!(effective.matches("admin", "hunter22"));
        assert!(!effective.matches("admin", "admin123"));
    }

    #[test]
    fn short_password_is_rejected() {
        let err = store().reset_password("12345").unwrap_err();
        assert!(matches!(err, AuthError::InvalidPassword(_)));
    }

    #[test]
    fn blank_override_fields_fall_back() {
        let store = store();
        let blank = AdminCredentials {
            username: String::new(),
            password: String::new(),
        };
        assert!(store.local.save(keys::ADMIN_CREDENTIALS, &blank));
        assert!(store.effective().matches("admin", "admin123"));
    }

    #[test]
    fn debug_hides_password() {
        let creds = store().effective();
        assert!(!format!("{creds:?}").contains("admin123"));
    }
}
