//! # folio-config
//!
//! Layered configuration loading for Folio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FOLIO_*` prefix, `__` as separator)
//! 2. Project-level `.folio/config.toml`
//! 3. User-level `~/.config/folio/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FOLIO_REMOTE__URL` -> `remote.url`, `FOLIO_IDLE__TIMEOUT_MS` -> `idle.timeout_ms`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use folio_config::FolioConfig;
//!
//! let config = FolioConfig::load_with_dotenv().expect("config");
//!
//! if config.remote.is_configured() {
//!     println!("Remote: {}", config.remote.rest_base());
//! }
//! ```

mod admin;
mod error;
mod idle;
mod remote;
mod storage;

pub use admin::AdminConfig;
pub use error::ConfigError;
pub use idle::IdleConfig;
pub use remote::RemoteConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub idle: IdleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl FolioConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and check cross-field constraints.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the current directory's `.env` (if any) before
    /// building the figment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".folio/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FOLIO_").split("__"))
    }

    /// Check constraints that span fields within a section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.admin.validate()?;
        self.idle.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
    }
}
