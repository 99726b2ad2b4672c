//! # folio-store
//!
//! Persistence for Folio: a local key/value adapter, a remote PostgREST
//! adapter, and the [`ProjectRepository`] that prefers the remote and falls
//! back to the local store.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use folio_config::FolioConfig;
//! use folio_core::clock::SystemClock;
//! use folio_store::{LocalStore, ProjectRepository, RemoteProjects, RestRemote};
//!
//! # async fn run() {
//! let config = FolioConfig::load().expect("config");
//! let remote = RestRemote::from_config(&config.remote)
//!     .map(|r| Arc::new(r) as Arc<dyn RemoteProjects>);
//! let repo = ProjectRepository::new(remote, LocalStore::in_memory(), Arc::new(SystemClock));
//! let report = repo.load_all().await;
//! println!("{} projects from {}", report.count, report.source);
//! # }
//! ```

pub mod error;
pub mod keys;
pub mod local;
pub mod preferences;
pub mod remote;
pub mod repository;
pub mod seed;

mod test_support;

pub use error::{LocalStorageError, StoreError};
pub use local::{FileStore, KeyValueStore, LocalStore, MemoryStore};
pub use preferences::Preferences;
pub use remote::{RemoteError, RemoteFailure, RemoteProjects, RemoteStatus, RestRemote};
pub use repository::{DeleteReport, LoadReport, ProjectRepository, SaveReport};

use folio_config::StorageConfig;

/// Open the file-backed local store described by `config`.
///
/// Returns `None` when no home directory can be found and no explicit
/// directory is configured.
#[must_use]
pub fn open_local(config: &StorageConfig) -> Option<LocalStore> {
    let dir = config.resolve_dir()?;
    tracing::debug!(dir = %dir.display(), "opening local store");
    Some(LocalStore::new(FileStore::new(dir, config.quota())))
}
