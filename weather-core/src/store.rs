//! Per-profile preference storage.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::preferences::{PreferencesUpdate, WeatherPreferences};

pub trait PreferenceStore {
    /// Stored preferences, or `None` for an unknown profile.
    fn get(&self, profile: &str) -> Result<Option<WeatherPreferences>>;

    /// Merge `update` into the profile's record and persist it. Unknown
    /// profiles start from an empty record. Nothing is written when the
    /// merged record fails validation.
    fn update(&mut self, profile: &str, update: &PreferencesUpdate) -> Result<WeatherPreferences>;

    fn profiles(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredProfiles {
    #[serde(default)]
    profiles: BTreeMap<String, WeatherPreferences>,
}

impl StoredProfiles {
    fn apply(&mut self, profile: &str, update: &PreferencesUpdate) -> Result<WeatherPreferences> {
        let profile = profile.trim();
        if profile.is_empty() {
            return Err(anyhow!("Profile name must not be empty"));
        }

        let current = self.profiles.get(profile).cloned().unwrap_or_default();
        let merged = current
            .merged(update)
            .with_context(|| format!("Invalid preferences for profile '{profile}'"))?;

        self.profiles.insert(profile.to_string(), merged.clone());
        Ok(merged)
    }
}

/// Profiles kept in a TOML file:
///
/// [profiles.alice]
/// latitude = 50.08
/// likes_sun = true
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoredProfiles> {
        if !self.path.exists() {
            return Ok(StoredProfiles::default());
        }

        let contents = fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read preferences file: {}", self.path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!("Failed to parse preferences file: {}", self.path.display())
        })
    }

    fn save(&self, stored: &StoredProfiles) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(stored)
            .context("Failed to serialize preferences to TOML")?;

        fs::write(&self.path, toml).with_context(|| {
            format!("Failed to write preferences file: {}", self.path.display())
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, profile: &str) -> Result<Option<WeatherPreferences>> {
        Ok(self.load()?.profiles.remove(profile.trim()))
    }

    fn update(&mut self, profile: &str, update: &PreferencesUpdate) -> Result<WeatherPreferences> {
        let mut stored = self.load()?;
        let merged = stored.apply(profile, update)?;
        self.save(&stored)?;

        tracing::info!(profile, path = %self.path.display(), "saved weather preferences");
        Ok(merged)
    }

    fn profiles(&self) -> Result<Vec<String>> {
        Ok(self.load()?.profiles.into_keys().collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stored: StoredProfiles,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, profile: &str) -> Result<Option<WeatherPreferences>> {
        Ok(self.stored.profiles.get(profile.trim()).cloned())
    }

    fn update(&mut self, profile: &str, update: &PreferencesUpdate) -> Result<WeatherPreferences> {
        self.stored.apply(profile, update)
    }

    fn profiles(&self) -> Result<Vec<String>> {
        Ok(self.stored.profiles.keys().cloned().collect())
    }
}
