use std::time::Duration;

use folio_core::errors::ValidationError;
use folio_store::LocalStorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password ({attempts_left} attempts left)")]
    InvalidCredentials { attempts_left: u32 },

    #[error("too many failed attempts; locked for another {}s", .remaining.as_secs())]
    LockedOut { remaining: Duration },

    #[error("not logged in. run `folio login`")]
    NotAuthenticated,

    #[error("session expired. run `folio login` again")]
    SessionExpired,

    #[error("session state could not be saved: {0}")]
    Storage(#[from] LocalStorageError),

    #[error(transparent)]
    InvalidPassword(#[from] ValidationError),

    #[error("idle warning ({warning:?}) must come before the timeout ({timeout:?})")]
    IdleWindow { warning: Duration, timeout: Duration },
}
