//! Local persistence adapter.
//!
//! [`KeyValueStore`] is the raw string backend: [`MemoryStore`] for tests and
//! ephemeral runs, [`FileStore`] for the CLI (one file per key). Callers go
//! through [`LocalStore`], which serializes values as JSON and never returns
//! an error: failures are logged and surface as `false` or the caller's
//! default.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// A string-keyed, string-valued store.
///
/// Backends with a byte quota charge each entry its key length plus its
/// value length, the way browser storage does, so one `quota_bytes` setting
/// means the same thing for every backend.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`. Absent keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

fn check_quota(key: &str, used_elsewhere: u64, incoming: u64, quota: Option<u64>) -> Result<(), StoreError> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let needed = used_elsewhere + incoming;
    if needed > quota {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store, optionally bounded by a byte quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<u64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys plus values exceed `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: u64) -> Self {
        Self {
            entries: Mutex::default(),
            quota: Some(quota),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let used_elsewhere: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        check_quota(
            key,
            used_elsewhere as u64,
            (key.len() + value.len()) as u64,
            self.quota,
        )?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
///
/// The directory is created `0700` and value files are written `0600` on
/// Unix. Writes go through a temporary file and a rename, so a crash never
/// leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<u64>,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, quota: Option<u64>) -> Self {
        Self {
            dir: dir.into(),
            quota,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            key: key.to_string(),
            source,
        }
    }

    fn ensure_dir(&self, key: &str) -> Result<(), StoreError> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(Self::io_error(key))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }

    /// Key plus value bytes held by every entry except `skip`.
    fn usage_excluding(&self, skip: &Path) -> u64 {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return 0;
        };
        entries
            .filter_map(Result::ok)
            .filter(|entry| {
                let path = entry.path();
                path != skip && path.extension().is_some_and(|ext| ext == "json")
            })
            .filter_map(|entry| {
                let key_len = entry.path().file_stem().map_or(0, |stem| stem.len() as u64);
                entry.metadata().ok().map(|meta| key_len + meta.len())
            })
            .sum()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key)(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        self.ensure_dir(key)?;
        check_quota(
            key,
            self.usage_excluding(&path),
            (key.len() + value.len()) as u64,
            self.quota,
        )?;

        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value).map_err(Self::io_error(key))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
                .map_err(Self::io_error(key))?;
        }
        fs::rename(&tmp, &path).map_err(Self::io_error(key))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key)(e)),
        }
    }
}

// ---------------------------------------------------------------------------
// LocalStore
// ---------------------------------------------------------------------------

/// JSON facade over a [`KeyValueStore`] that never fails outward.
///
/// Cloning is cheap; clones share the same backend.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}

impl LocalStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    #[must_use]
    pub fn from_shared(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Unbounded in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// Returns `false` (and logs a warning) if serialization or the write
    /// fails, including when the quota is exhausted.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StoreError::from)
            .and_then(|raw| self.backend.set(key, &raw));
        match result {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(key, %error, "local save failed");
                false
            }
        }
    }

    /// Read and deserialize `key`, or `None` if it is absent or unreadable.
    pub fn load_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(key, %error, "local load failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(key, %error, "stored value is corrupt; using default");
                None
            }
        }
    }

    /// Read and deserialize `key`, falling back to `default` when it is
    /// absent, unreadable, or does not parse.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.load_opt(key).unwrap_or(default)
    }

    /// Delete `key`. Returns `false` (and logs) only on a backend failure.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.remove(key) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(key, %error, "local remove failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_store_roundtrips_json() {
        let store = LocalStore::in_memory();
        assert!(store.save("list", &vec![1, 2, 3]));
        assert_eq!(store.load::<Vec<i32>>("list", Vec::new()), vec![1, 2, 3]);
    }

    #[test]
    fn absent_key_yields_default() {
        let store = LocalStore::in_memory();
        assert_eq!(store.load("missing", 7_u32), 7);
        assert!(store.load_opt::<u32>("missing").is_none());
    }

    #[test]
    fn corrupt_value_yields_default() {
        let backend = Arc::new(MemoryStore::new());
        backend.set("count", "{not json").unwrap();
        let store = LocalStore::from_shared(backend);
        assert_eq!(store.load("count", 0_u32), 0);
    }

    #[test]
    fn quota_rejection_reports_false_and_keeps_previous_value() {
        let store = LocalStore::new(MemoryStore::with_quota(32));
        assert!(store.save("k", "short"));
        let big = "x".repeat(64);
        assert!(!store.save("k", &big));
        assert_eq!(store.load("k", String::new()), "short");
    }

    #[test]
    fn remove_absent_key_succeeds() {
        let store = LocalStore::in_memory();
        assert!(store.remove("nothing"));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let first = LocalStore::new(FileStore::new(dir.path().join("storage"), None));
        assert!(first.save("theme", "dark"));

        let second = LocalStore::new(FileStore::new(dir.path().join("storage"), None));
        assert_eq!(second.load("theme", String::new()), "dark");
        assert!(second.remove("theme"));
        assert!(second.load_opt::<String>("theme").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn file_store_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("storage");
        let store = FileStore::new(&root, None);
        store.set("adminSession", "{}").unwrap();

        let dir_mode = fs::metadata(&root).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(root.join("adminSession.json"))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode, 0o700);
        assert_eq!(file_mode, 0o600);
    }

    #[test]
    fn file_store_enforces_quota_across_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), Some(16));
        store.set("a", "0123456789").unwrap();
        let err = store.set("b", "0123456789").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { quota: 16, .. }));
        // Overwriting the same key only counts the new value.
        store.set("a", "9876543210").unwrap();
    }

    #[test]
    fn backends_charge_quota_identically() {
        let dir = tempfile::tempdir().unwrap();
        let backends: Vec<Box<dyn KeyValueStore>> = vec![
            Box::new(MemoryStore::with_quota(20)),
            Box::new(FileStore::new(dir.path(), Some(20))),
        ];
        for store in backends {
            store.set("ab", "0123456789").unwrap();
            store.set("cd", "012345").unwrap();
            // An empty value still costs its key.
            assert!(matches!(
                store.set("ef", ""),
                Err(StoreError::QuotaExceeded { needed: 22, .. })
            ));
        }
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), None);
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
