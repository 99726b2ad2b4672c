use std::path::Path;

use anyhow::Context;
use folio_core::image::{ImageData, mime_from_path};
use folio_core::tags::TagList;
use folio_core::validation::{RawSubmission, validate};
use folio_core::enums::StoreSource;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectAddArgs;
use crate::commands::ProjectRow;
use crate::context::AppContext;
use crate::output::{advise, output};

#[derive(Serialize)]
struct AddResponse {
    #[serde(flatten)]
    project: ProjectRow,
    stored_in: StoreSource,
    mirrored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    advisory: Option<String>,
}

/// Read and encode an image file.
fn load_image(path: &Path) -> anyhow::Result<ImageData> {
    let mime = mime_from_path(path).unwrap_or("application/octet-stream");
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    ImageData::encode(&bytes, mime).with_context(|| format!("cannot use {} as the project image", path.display()))
}

/// Handle `folio project add`.
pub async fn handle(args: &ProjectAddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.guard.require_active()?;

    let image = args.image.as_deref().map(load_image).transpose()?;
    let mut tags = TagList::new();
    for tech in &args.tech {
        tags.add(tech);
    }
    let raw = RawSubmission {
        title: args.title.clone(),
        description: args.description.clone(),
        link: args.link.clone(),
        github: args.github.clone(),
    };
    let draft = validate(&raw, image, &tags)?.featured(args.featured);

    super::refresh(ctx, flags).await;
    let report = ctx.repo.save_one(draft).await?;
    if let Some(error) = &report.advisory {
        advise(
            flags,
            format!("saved locally only: {error} ({})", error.cause.hint()),
        );
    }

    output(
        &AddResponse {
            project: ProjectRow::from(&report.project),
            stored_in: report.stored_in,
            mirrored: report.mirrored,
            advisory: report.advisory.map(|e| e.to_string()),
        },
        flags.format,
    )
}
