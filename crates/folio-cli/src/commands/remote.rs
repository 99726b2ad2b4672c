use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RemoteCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PingResponse {
    configured: bool,
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

/// Handle `folio remote <subcommand>`.
pub async fn handle(action: &RemoteCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        RemoteCommands::Ping => ping(ctx, flags).await,
    }
}

async fn ping(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = match ctx.repo.probe().await {
        None => PingResponse {
            configured: false,
            reachable: false,
            rows: None,
            cause: None,
            message: None,
            hint: Some("set remote.url and remote.anon_key (FOLIO_REMOTE__URL, FOLIO_REMOTE__ANON_KEY)".into()),
        },
        Some(Ok(status)) => PingResponse {
            configured: true,
            reachable: true,
            rows: status.rows,
            cause: None,
            message: None,
            hint: None,
        },
        Some(Err(error)) => PingResponse {
            configured: true,
            reachable: false,
            rows: None,
            cause: Some(error.cause.to_string()),
            message: Some(error.message.clone()),
            hint: Some(error.cause.hint().to_string()),
        },
    };
    output(&response, flags.format)
}
