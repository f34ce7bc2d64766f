//! Display preferences
//!
//! Font size, prompt theme and cursor style. They persist as JSON under a
//! fixed key; a missing or unreadable record falls back to the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key, also used as the file stem on disk.
pub const SETTINGS_KEY: &str = "echo-shell-settings";

pub const MIN_FONT_SIZE: u32 = 10;
pub const MAX_FONT_SIZE: u32 = 24;
pub const DEFAULT_FONT_SIZE: u32 = 14;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to access settings: {0}")]
    Io(#[from] io::Error),

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Prompt theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    EchoShell,
    Powershell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorStyle {
    #[default]
    Block,
    Underline,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub font_size: u32,
    pub theme: Theme,
    pub cursor_style: CursorStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            theme: Theme::default(),
            cursor_style: CursorStyle::default(),
        }
    }
}

impl Settings {
    /// Set the font size, clamped to the supported range.
    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }
}

/// JSON-file backed settings storage.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store settings in `dir`, under the fixed key.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(format!("{}.json", SETTINGS_KEY)) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored settings. `Ok(None)` when nothing has been stored yet.
    pub fn try_load(&self) -> Result<Option<Settings>, SettingsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut settings: Settings = serde_json::from_str(&raw)?;
        settings.set_font_size(settings.font_size);
        Ok(Some(settings))
    }

    /// Read the stored settings, falling back to defaults.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!(path = %self.path.display(), "no stored settings, using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), "failed to load settings: {}", e);
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(settings)?)?;
        Ok(())
    }
}
