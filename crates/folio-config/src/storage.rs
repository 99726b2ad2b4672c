//! Local key/value storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage quota: 5 MiB, the usual browser local-storage budget.
const fn default_quota_bytes() -> u64 {
    5 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding one file per key. Empty means `~/.folio/storage`.
    #[serde(default)]
    pub dir: String,

    /// Upper bound on the total size of stored values. `0` disables the check.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

impl StorageConfig {
    /// Resolve the storage directory, falling back to `~/.folio/storage`.
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        if self.dir.is_empty() {
            dirs::home_dir().map(|home| home.join(".folio").join("storage"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }

    pub const fn quota(&self) -> Option<u64> {
        if self.quota_bytes == 0 {
            None
        } else {
            Some(self.quota_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            dir: "/tmp/folio-store".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_dir(), Some(PathBuf::from("/tmp/folio-store")));
    }

    #[test]
    fn zero_quota_disables_limit() {
        let config = StorageConfig {
            quota_bytes: 0,
            ..Default::default()
        };
        assert_eq!(config.quota(), None);
        assert_eq!(StorageConfig::default().quota(), Some(5 * 1024 * 1024));
    }
}
