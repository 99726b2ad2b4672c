use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{advise, output};

/// Handle `folio project stats`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.repo.load_all().await;
    if let Some(error) = &report.advisory {
        advise(flags, format!("counting local projects: {error}"));
    }
    output(&ctx.repo.stats(), flags.format)
}
