//! Wiring of config, stores, repository, and guard for one invocation.

use std::sync::Arc;

use anyhow::Context;
use folio_auth::{AuthSettings, SessionGuard};
use folio_config::FolioConfig;
use folio_core::clock::{Clock, SystemClock};
use folio_store::{
    LocalStore, Preferences, ProjectRepository, RemoteProjects, RestRemote, open_local,
};

use crate::cli::GlobalFlags;

pub struct AppContext {
    pub config: FolioConfig,
    pub clock: Arc<dyn Clock>,
    pub repo: ProjectRepository,
    pub guard: SessionGuard,
    pub prefs: Preferences,
}

impl AppContext {
    /// Build the context from loaded config, honoring `--storage`.
    pub fn init(mut config: FolioConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        if let Some(dir) = &flags.storage {
            config.storage.dir.clone_from(dir);
        }
        let local = open_local(&config.storage)
            .context("cannot locate a home directory for the local store; pass --storage <dir>")?;
        Ok(Self::with_local(config, local, Arc::new(SystemClock)))
    }

    pub fn with_local(config: FolioConfig, local: LocalStore, clock: Arc<dyn Clock>) -> Self {
        let remote = RestRemote::from_config(&config.remote)
            .map(|remote| Arc::new(remote) as Arc<dyn RemoteProjects>);
        if remote.is_none() {
            tracing::debug!("no remote configured; projects are kept locally");
        }
        let repo = ProjectRepository::new(remote, local.clone(), clock.clone());
        let guard = SessionGuard::new(
            local.clone(),
            clock.clone(),
            AuthSettings::from_config(&config.admin),
        );
        Self {
            config,
            clock,
            repo,
            guard,
            prefs: Preferences::new(local),
        }
    }
}
