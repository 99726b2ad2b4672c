//! Keys used in the local key/value store.
//!
//! The names match what the site kept in browser storage, so a store
//! exported from there reads back unchanged.

/// Project snapshot mirror.
pub const PROJECTS: &str = "portfolioProjects";
/// Admin session record.
pub const SESSION: &str = "adminSession";
/// Consecutive failed login count.
pub const LOGIN_ATTEMPTS: &str = "loginAttempts";
/// Millisecond timestamp of the last failed login.
pub const LAST_FAILED_ATTEMPT: &str = "lastFailedAttempt";
/// Credential override set through the password reset flow.
pub const ADMIN_CREDENTIALS: &str = "adminCredentials";
/// Owner profile shown on the public page.
pub const PROFILE: &str = "portfolioConfig";
/// Light/dark theme preference.
pub const THEME: &str = "theme";
