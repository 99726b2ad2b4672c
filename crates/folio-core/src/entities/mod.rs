//! Entity structs for all Folio records.
//!
//! Every struct derives `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip through the local store and the hosted table.

mod contact;
mod profile;
mod project;
mod session;

pub use contact::ContactMessage;
pub use profile::Profile;
pub use project::{Project, ProjectStats, ValidatedDraft};
pub use session::Session;
