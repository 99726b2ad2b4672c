//! Admin login, session expiry, and failed-attempt lockout.
//!
//! All state (session record, attempt counter, last failure time) lives in
//! the local store, so separate CLI invocations sharing a store directory
//! see the same session and the same lockout.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use folio_core::clock::Clock;
use folio_core::entities::Session;
use folio_store::{LocalStorageError, LocalStore, keys};

use crate::credentials::{AdminCredentials, CredentialStore};
use crate::error::AuthError;
use crate::settings::AuthSettings;

/// Snapshot of the guard's state for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardStatus {
    /// The active session, if any.
    pub session: Option<Session>,
    pub failed_attempts: u32,
    pub attempts_left: u32,
    pub lockout_remaining: Option<Duration>,
}

#[derive(Clone)]
pub struct SessionGuard {
    local: LocalStore,
    clock: Arc<dyn Clock>,
    settings: AuthSettings,
    credentials: CredentialStore,
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("local", &self.local)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn to_std(delta: TimeDelta) -> Duration {
    delta.to_std().unwrap_or(Duration::ZERO)
}

impl SessionGuard {
    pub fn new(local: LocalStore, clock: Arc<dyn Clock>, settings: AuthSettings) -> Self {
        let credentials = CredentialStore::new(
            local.clone(),
            AdminCredentials {
                username: settings.username.clone(),
                password: settings.password.clone(),
            },
        );
        Self {
            local,
            clock,
            settings,
            credentials,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    /// Check credentials and open a session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::LockedOut`] while a lockout is running, even for
    ///   correct credentials.
    /// - [`AuthError::InvalidCredentials`] on a mismatch; the failure is
    ///   counted and the last allowed failure starts the lockout.
    /// - [`AuthError::Storage`] if the session record cannot be written, or
    ///   if a failed attempt cannot be recorded. Unrecorded failures would
    ///   never add up to a lockout.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let now = self.clock.now();
        if let Some(remaining) = self.lockout_remaining_at(now) {
            tracing::warn!(remaining_secs = remaining.as_secs(), "login refused during lockout");
            return Err(AuthError::LockedOut { remaining });
        }

        if !self.credentials.effective().matches(username, password) {
            let attempts = self.failed_attempts() + 1;
            // The timestamp goes first: a counter without one reads as an
            // elapsed lockout and is cleared.
            let recorded = self
                .local
                .save(keys::LAST_FAILED_ATTEMPT, &now.timestamp_millis())
                && self.local.save(keys::LOGIN_ATTEMPTS, &attempts);
            if !recorded {
                tracing::warn!(attempts, "failed login could not be recorded; refusing");
                return Err(LocalStorageError {
                    key: keys::LOGIN_ATTEMPTS.to_string(),
                }
                .into());
            }
            let attempts_left = self.settings.max_attempts.saturating_sub(attempts);
            if attempts_left == 0 {
                tracing::warn!(attempts, "too many failed logins; lockout started");
            } else {
                tracing::warn!(attempts, attempts_left, "failed login");
            }
            return Err(AuthError::InvalidCredentials { attempts_left });
        }

        self.clear_attempts();
        let session = Session::start(now, self.settings.session);
        if !self.local.save(keys::SESSION, &session) {
            return Err(LocalStorageError {
                key: keys::SESSION.to_string(),
            }
            .into());
        }
        tracing::info!(username, expires_at = %session.expires_at, "admin logged in");
        Ok(session)
    }

    /// End the session immediately.
    pub fn logout(&self) {
        if self.local.remove(keys::SESSION) {
            tracing::info!("admin logged out");
        }
    }

    /// End the session because the idle timeout elapsed.
    pub fn expire(&self) {
        if self.local.remove(keys::SESSION) {
            tracing::info!("admin session expired after inactivity");
        }
    }

    /// The active session. A stored session past its expiry is cleared and
    /// reads as `None`.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        let session: Session = self.local.load_opt(keys::SESSION)?;
        if session.is_active_at(self.clock.now()) {
            Some(session)
        } else {
            self.expire();
            None
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current_session().is_some()
    }

    /// The active session, or why there is none.
    ///
    /// # Errors
    ///
    /// [`AuthError::SessionExpired`] if a session existed but ran out,
    /// [`AuthError::NotAuthenticated`] if there was none.
    pub fn require_active(&self) -> Result<Session, AuthError> {
        let had_session = self.local.load_opt::<Session>(keys::SESSION).is_some();
        match self.current_session() {
            Some(session) => Ok(session),
            None if had_session => Err(AuthError::SessionExpired),
            None => Err(AuthError::NotAuthenticated),
        }
    }

    /// Time left on the current lockout, if one is running.
    #[must_use]
    pub fn lockout_remaining(&self) -> Option<Duration> {
        self.lockout_remaining_at(self.clock.now())
    }

    /// Replace the admin password.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidPassword`] if the password is too short,
    /// [`AuthError::Storage`] if it cannot be stored.
    pub fn change_password(&self, new_password: &str) -> Result<(), AuthError> {
        self.credentials.reset_password(new_password)
    }

    #[must_use]
    pub fn status(&self) -> GuardStatus {
        let lockout_remaining = self.lockout_remaining();
        let failed_attempts = self.failed_attempts();
        GuardStatus {
            session: self.current_session(),
            failed_attempts,
            attempts_left: self.settings.max_attempts.saturating_sub(failed_attempts),
            lockout_remaining,
        }
    }

    fn failed_attempts(&self) -> u32 {
        self.local.load(keys::LOGIN_ATTEMPTS, 0)
    }

    fn clear_attempts(&self) {
        self.local.remove(keys::LOGIN_ATTEMPTS);
        self.local.remove(keys::LAST_FAILED_ATTEMPT);
    }

    /// Remaining lockout at `now`. An elapsed lockout resets the counter.
    fn lockout_remaining_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.failed_attempts() < self.settings.max_attempts {
            return None;
        }
        let ends = self
            .local
            .load_opt::<i64>(keys::LAST_FAILED_ATTEMPT)
            .and_then(DateTime::from_timestamp_millis)
            .and_then(|last| last.checked_add_signed(self.settings.lockout));
        match ends {
            Some(ends) if now < ends => Some(to_std(ends - now)),
            _ => {
                tracing::debug!("lockout elapsed; attempt counter reset");
                self.clear_attempts();
                None
            }
        }
    }
}
