use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use outreach_core::Settings;
use outreach_logging::{outreach_info, outreach_warn};
use serde::{Deserialize, Serialize};

use crate::persist::{write_atomically, PersistError};

pub const SETTINGS_FILENAME: &str = "settings.json";

/// On-disk shape of the settings blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSettings {
    url: String,
    kw: String,
    comment: String,
}

/// Single JSON blob holding the three user fields, overwritten wholesale.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing, unreadable or malformed blobs yield default settings.
    pub fn load(&self) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Settings::default();
            }
            Err(err) => {
                outreach_warn!("Failed to read settings from {:?}: {}", self.path, err);
                return Settings::default();
            }
        };

        let persisted: PersistedSettings = match serde_json::from_str(&content) {
            Ok(persisted) => persisted,
            Err(err) => {
                outreach_warn!("Ignoring malformed settings in {:?}: {}", self.path, err);
                return Settings::default();
            }
        };

        outreach_info!("Loaded settings from {:?}", self.path);
        Settings {
            target_url: persisted.url,
            keywords: persisted.kw,
            generated_comment: persisted.comment,
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), PersistError> {
        let persisted = PersistedSettings {
            url: settings.target_url.clone(),
            kw: settings.keywords.clone(),
            comment: settings.generated_comment.clone(),
        };
        let content = serde_json::to_string_pretty(&persisted)
            .map_err(|err| PersistError::Io(err.into()))?;
        write_atomically(&self.path, &content)?;
        outreach_info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}
