use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatusResponse {
    logged_in: bool,
    expires_at: Option<String>,
    remaining_secs: Option<i64>,
    failed_attempts: u32,
    attempts_left: u32,
    lockout_remaining_secs: Option<u64>,
    remote_configured: bool,
    theme: String,
}

/// Handle `folio status`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = ctx.guard.status();
    let now = ctx.clock.now();
    let response = StatusResponse {
        logged_in: status.session.is_some(),
        expires_at: status.session.as_ref().map(|s| s.expires_at.to_rfc3339()),
        remaining_secs: status
            .session
            .as_ref()
            .and_then(|s| s.remaining_at(now))
            .map(|left| left.num_seconds()),
        failed_attempts: status.failed_attempts,
        attempts_left: status.attempts_left,
        lockout_remaining_secs: status.lockout_remaining.map(|d| d.as_secs()),
        remote_configured: ctx.repo.has_remote(),
        theme: ctx.prefs.theme().to_string(),
    };
    output(&response, flags.format)
}
