//! File-backed preference store.
//!
//! Session and preference state (selected district, language, the mock auth
//! session) is persisted as one small YAML file: read once at startup,
//! written on every change. Writes go through a temp file and rename so a
//! crash mid-write never leaves a torn file behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::AuthSession;
use tracing::{info, warn};

const PREFERENCES_FILE: &str = "preferences.yaml";

fn default_language() -> String {
    "en".to_string()
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub selected_district: Option<String>,
    /// UI language code, "en" or "bn".
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub auth: Option<AuthSession>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { selected_district: None, language: default_language(), auth: None }
    }
}

/// Reads and writes the preference file.
#[derive(Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Create a store backed by an explicit file path (tests use this with
    /// a temp directory).
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Create a store in the default data directory,
    /// `<documents>/Blood Connect/preferences.yaml`, falling back to the
    /// home directory when no documents folder exists.
    pub fn new_default() -> Result<Self> {
        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .context("could not determine a data directory for preferences")?;
        Ok(Self::new(base.join("Blood Connect").join(PREFERENCES_FILE)))
    }

    /// Load preferences from disk. A missing file yields the defaults; an
    /// unreadable file is reported and replaced by defaults on next save.
    pub fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        match serde_yaml::from_str(&content) {
            Ok(preferences) => Ok(preferences),
            Err(e) => {
                warn!("Preference file {} is malformed ({}), using defaults", self.path.display(), e);
                Ok(Preferences::default())
            }
        }
    }

    /// Write preferences to disk atomically (temp file + rename).
    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let content = serde_yaml::to_string(preferences)?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        info!("Saved preferences to {}", self.path.display());
        Ok(())
    }

    /// Load, mutate and save in one step; returns the updated preferences.
    pub fn update<F>(&self, mutate: F) -> Result<Preferences>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut preferences = self.load()?;
        mutate(&mut preferences);
        self.save(&preferences)?;
        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::UserRole;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PreferenceStore {
        PreferenceStore::new(dir.path().join(PREFERENCES_FILE))
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let prefs = store_in(&dir).load().unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.language, "en");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let prefs = Preferences {
            selected_district: Some("Sylhet".to_string()),
            language: "bn".to_string(),
            auth: Some(AuthSession {
                email: "blood@user.com".to_string(),
                name: "Regular User".to_string(),
                role: UserRole::User,
                location: Some("Chittagong".to_string()),
                blood_group: None,
                phone: None,
            }),
        };
        store.save(&prefs).unwrap();

        assert_eq!(store.load().unwrap(), prefs);
        // No stray temp file left behind.
        assert!(!dir.path().join("preferences.tmp").exists());
    }

    #[test]
    fn update_persists_the_mutation() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let updated = store
            .update(|prefs| prefs.selected_district = Some("Khulna".to_string()))
            .unwrap();
        assert_eq!(updated.selected_district.as_deref(), Some("Khulna"));
        assert_eq!(store.load().unwrap().selected_district.as_deref(), Some("Khulna"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, ": not yaml [").unwrap();

        let prefs = PreferenceStore::new(&path).load().unwrap();
        assert_eq!(prefs, Preferences::default());
    }
}
