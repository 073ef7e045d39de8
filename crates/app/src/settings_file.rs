//! Persistent session settings.

use directories::ProjectDirs;
use roomwalk_core::GameConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

pub const SETTINGS_PATH_ENV: &str = "ROOMWALK_SETTINGS";
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SettingsFile {
    pub format_version: u32,
    #[serde(default)]
    pub game: GameConfig,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self { format_version: SETTINGS_FORMAT_VERSION, game: GameConfig::default() }
    }
}

impl SettingsFile {
    /// `ROOMWALK_SETTINGS` when set, otherwise `settings.json` in the platform config dir.
    pub fn get_default_path() -> Option<PathBuf> {
        resolve_path(env::var_os(SETTINGS_PATH_ENV).map(PathBuf::from))
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Reads and validates a settings file; an invalid config is reported as `InvalidData`.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        settings.game.validate().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }

    /// Loads `path`, writing defaults there on first launch. Any failure falls back to defaults
    /// and is returned as a message for the caller to report.
    pub fn load_or_create(path: &Path) -> (Self, Option<String>) {
        match Self::load(path) {
            Ok(settings) => (settings, None),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                let settings = Self::default();
                let notice = settings.write_atomic(path).err().map(|error| {
                    format!("could not write default settings to {}: {error}", path.display())
                });
                (settings, notice)
            }
            Err(error) => (
                Self::default(),
                Some(format!("ignoring settings at {}: {error}", path.display())),
            ),
        }
    }
}

fn resolve_path(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
        let mut path = proj_dirs.config_dir().to_path_buf();
        path.push("settings.json");
        path
    })
}
