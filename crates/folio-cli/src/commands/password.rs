use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PasswordCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio password <subcommand>`.
pub fn handle(action: &PasswordCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        PasswordCommands::Reset(args) => {
            ctx.guard.change_password(&args.new)?;
            output(
                &json!({ "updated": true, "username": ctx.guard.settings().username }),
                flags.format,
            )
        }
    }
}
