//! # folio-auth
//!
//! Admin authentication for Folio.
//!
//! Provides the [`SessionGuard`] (credential check, two-hour sessions,
//! failed-attempt lockout, password override) and the [`IdleMonitor`] that
//! warns and then expires an idle session. Guard state is kept in the
//! `folio-store` local store so every CLI invocation sees the same session.

pub mod credentials;
pub mod error;
pub mod guard;
pub mod idle;
pub mod settings;

pub use credentials::{AdminCredentials, CredentialStore};
pub use error::AuthError;
pub use guard::{GuardStatus, SessionGuard};
pub use idle::{ActivityHandle, IdleMonitor, SessionSignal};
pub use settings::AuthSettings;
