use folio_core::enums::Theme;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ThemeArgs, ThemeChoice};
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio theme [light|dark|toggle]`.
pub fn handle(args: &ThemeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let theme = match args.theme {
        None => ctx.prefs.theme(),
        Some(ThemeChoice::Toggle) => ctx.prefs.toggle_theme()?,
        Some(ThemeChoice::Light) => set(ctx, Theme::Light)?,
        Some(ThemeChoice::Dark) => set(ctx, Theme::Dark)?,
    };
    output(&json!({ "theme": theme }), flags.format)
}

fn set(ctx: &AppContext, theme: Theme) -> anyhow::Result<Theme> {
    ctx.prefs.set_theme(theme)?;
    Ok(theme)
}
