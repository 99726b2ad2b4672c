use folio_core::ids::ProjectId;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectDeleteArgs;
use crate::context::AppContext;
use crate::output::{advise, output};

#[derive(Serialize)]
struct DeleteResponse {
    id: String,
    removed: bool,
    mirrored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisory: Option<String>,
}

/// Handle `folio project delete <id>`.
pub async fn handle(args: &ProjectDeleteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.guard.require_active()?;
    super::refresh(ctx, flags).await;

    let id = ProjectId::parse(&args.id);
    let report = ctx.repo.delete_one(&id).await;
    if !report.removed {
        advise(flags, format!("no project with id {id}"));
    }
    if let Some(error) = &report.advisory {
        advise(flags, format!("removed locally only: {error}"));
    }
    if report.removed && !report.mirrored {
        advise(flags, "local mirror was not updated");
    }

    output(
        &DeleteResponse {
            id: report.id.to_string(),
            removed: report.removed,
            mirrored: report.mirrored,
            advisory: report.advisory.map(|e| e.to_string()),
        },
        flags.format,
    )
}
