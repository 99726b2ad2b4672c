use serde_json::json;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio logout`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.guard.logout();
    output(&json!({ "logged_in": false }), flags.format)
}
