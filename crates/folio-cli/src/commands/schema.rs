use folio_core::entities::Project;

use crate::cli::GlobalFlags;

/// Handle `folio schema`. Always JSON, whatever `--format` says.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(Project);
    let rendered = if flags.format == crate::cli::OutputFormat::Raw {
        serde_json::to_string(&schema)?
    } else {
        serde_json::to_string_pretty(&schema)?
    };
    println!("{rendered}");
    Ok(())
}
