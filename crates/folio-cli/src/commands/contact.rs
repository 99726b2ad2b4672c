use folio_core::validation::{RawContact, validate_contact};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ContactArgs;
use crate::context::AppContext;
use crate::output::{advise, output};

#[derive(Serialize)]
struct ContactResponse {
    delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

/// Handle `folio contact`: validate, then deliver best-effort to the remote.
pub async fn handle(args: &ContactArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = RawContact {
        name: args.name.clone(),
        email: args.email.clone(),
        subject: args.subject.clone(),
        message: args.message.clone(),
    };
    let message = validate_contact(&raw, ctx.clock.now())?;

    let response = match ctx.repo.submit_contact(&message).await {
        Some(Ok(())) => ContactResponse {
            delivered: true,
            note: None,
        },
        Some(Err(error)) => {
            advise(flags, format!("{error} ({})", error.cause.hint()));
            ContactResponse {
                delivered: false,
                note: Some(error.to_string()),
            }
        }
        None => ContactResponse {
            delivered: false,
            note: Some("no remote configured; message was not sent".to_string()),
        },
    };
    output(&response, flags.format)
}
