use anyhow::ensure;
use folio_core::validation::is_valid_email;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProfileArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio profile`: print, or merge the given fields and save.
pub fn handle(args: &ProfileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut profile = ctx.prefs.profile();
    if args.is_update() {
        if let Some(name) = &args.name {
            profile.name = name.trim().to_string();
        }
        if let Some(email) = &args.email {
            let email = email.trim();
            ensure!(
                email.is_empty() || is_valid_email(email),
                "email address is not valid: {email}"
            );
            profile.email = email.to_string();
        }
        if let Some(phone) = &args.phone {
            profile.phone = phone.trim().to_string();
        }
        ctx.prefs.set_profile(&profile)?;
    }
    output(&profile, flags.format)
}
