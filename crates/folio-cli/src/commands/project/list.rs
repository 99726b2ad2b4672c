use folio_core::entities::Project;
use folio_core::enums::StoreSource;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::ProjectRow;
use crate::context::AppContext;
use crate::output::{advise, output};

#[derive(Serialize)]
struct ListResponse {
    source: StoreSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisory: Option<String>,
    projects: Vec<Project>,
}

/// Handle `folio project list`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.repo.load_all().await;
    let projects = ctx.repo.current_snapshot();

    if flags.format == OutputFormat::Table {
        if let Some(error) = &report.advisory {
            advise(flags, format!("showing local projects: {error}"));
        }
        let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
        return output(&rows, flags.format);
    }

    output(
        &ListResponse {
            source: report.source,
            advisory: report.advisory.map(|e| e.to_string()),
            projects,
        },
        flags.format,
    )
}
