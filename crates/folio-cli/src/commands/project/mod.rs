mod add;
mod delete;
mod list;
mod stats;

use folio_store::LoadReport;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;
use crate::output::advise;

/// Handle `folio project <subcommand>`.
pub async fn handle(action: &ProjectCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ProjectCommands::List => list::handle(ctx, flags).await,
        ProjectCommands::Add(args) => add::handle(args, ctx, flags).await,
        ProjectCommands::Delete(args) => delete::handle(args, ctx, flags).await,
        ProjectCommands::Stats => stats::handle(ctx, flags).await,
    }
}

/// Reload the snapshot ahead of a write, noting a fallback to local data.
async fn refresh(ctx: &AppContext, flags: &GlobalFlags) -> LoadReport {
    let report = ctx.repo.load_all().await;
    if let Some(note) = fallback_note(&report) {
        advise(flags, note);
    }
    report
}

fn fallback_note(report: &LoadReport) -> Option<String> {
    report
        .advisory
        .as_ref()
        .map(|error| format!("remote unavailable; working from local projects: {error}"))
}
