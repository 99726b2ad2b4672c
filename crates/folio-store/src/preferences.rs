//! Theme and owner-profile preferences kept in the local store.

use folio_core::entities::Profile;
use folio_core::enums::Theme;

use crate::error::LocalStorageError;
use crate::keys;
use crate::local::LocalStore;

#[derive(Debug, Clone)]
pub struct Preferences {
    local: LocalStore,
}

impl Preferences {
    #[must_use]
    pub const fn new(local: LocalStore) -> Self {
        Self { local }
    }

    /// Stored theme, light when unset or unreadable.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.local.load(keys::THEME, Theme::default())
    }

    /// Persist `theme`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStorageError`] when the local store rejects the write.
    pub fn set_theme(&self, theme: Theme) -> Result<(), LocalStorageError> {
        persist(&self.local, keys::THEME, &theme)
    }

    /// Flip between light and dark and return the new theme.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStorageError`] when the local store rejects the write.
    pub fn toggle_theme(&self) -> Result<Theme, LocalStorageError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    #[must_use]
    pub fn profile(&self) -> Profile {
        self.local.load(keys::PROFILE, Profile::default())
    }

    /// Replace the stored profile.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStorageError`] when the local store rejects the write.
    pub fn set_profile(&self, profile: &Profile) -> Result<(), LocalStorageError> {
        persist(&self.local, keys::PROFILE, profile)
    }
}

fn persist<T: serde::Serialize + ?Sized>(
    local: &LocalStore,
    key: &str,
    value: &T,
) -> Result<(), LocalStorageError> {
    if local.save(key, value) {
        Ok(())
    } else {
        Err(LocalStorageError {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn theme_defaults_to_light_and_toggles() {
        let prefs = Preferences::new(LocalStore::in_memory());
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn profile_roundtrips() {
        let prefs = Preferences::new(LocalStore::in_memory());
        let profile = Profile {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
        };
        prefs.set_profile(&profile).unwrap();
        assert_eq!(prefs.profile(), profile);
    }

    #[test]
    fn full_store_reports_failure() {
        let prefs = Preferences::new(LocalStore::new(MemoryStore::with_quota(1)));
        let err = prefs.set_theme(Theme::Dark).unwrap_err();
        assert_eq!(err.key, "theme");
        assert_eq!(prefs.theme(), Theme::Light);
    }
}
