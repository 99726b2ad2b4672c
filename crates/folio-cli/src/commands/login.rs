use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LoginResponse {
    logged_in: bool,
    username: String,
    started_at: String,
    expires_at: String,
}

/// Handle `folio login`.
pub fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => std::env::var("FOLIO_PASSWORD")
            .context("no password given: pass --password or set FOLIO_PASSWORD")?,
    };

    let session = ctx.guard.login(&args.username, &password)?;
    output(
        &LoginResponse {
            logged_in: session.active,
            username: args.username.clone(),
            started_at: session.started_at.to_rfc3339(),
            expires_at: session.expires_at.to_rfc3339(),
        },
        flags.format,
    )
}
