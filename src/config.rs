use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::calendar::DEFAULT_SPAN_DAYS;
use crate::storage::{FileStorage, StorageError};

const SETTINGS_FILE: &str = "settings.json";
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Runtime settings stored as `settings.json` in the platform config dir.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Where `data.json` lives; the platform data dir when unset.
    pub data_dir: Option<PathBuf>,
    pub calendar_span_days: usize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            calendar_span_days: DEFAULT_SPAN_DAYS,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::metadata::PKG_NAME).join(SETTINGS_FILE))
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let parsed = fs::read_to_string(path)
            .map_err(StorageError::from)
            .and_then(|contents| Ok(serde_json::from_str::<Settings>(&contents)?));
        match parsed {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp = path.with_extension("tmp");
        let mut f = File::create(&temp)?;
        f.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        f.sync_all()?;
        fs::rename(temp, path)?;
        Ok(())
    }

    /// Command-line override first, then the configured dir, then the
    /// platform default.
    pub fn resolve_data_dir(&self, cli_override: Option<PathBuf>) -> Option<PathBuf> {
        cli_override
            .or_else(|| self.data_dir.clone())
            .or_else(FileStorage::default_data_dir)
    }

    pub fn span_days(&self) -> usize {
        if self.calendar_span_days == 0 {
            DEFAULT_SPAN_DAYS
        } else {
            self.calendar_span_days
        }
    }

    /// Prompts for each field, keeping the current value on empty input.
    pub fn edit_interactive(&mut self) -> Result<(), dialoguer::Error> {
        let current_dir = self
            .data_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let data_dir: String = Input::new()
            .with_prompt("Data directory (empty for platform default)")
            .with_initial_text(current_dir)
            .allow_empty(true)
            .interact_text()?;
        self.data_dir = Some(data_dir.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        self.calendar_span_days = Input::new()
            .with_prompt("Calendar span (days)")
            .default(self.span_days())
            .validate_with(|v: &usize| -> Result<(), &'static str> {
                if *v == 0 { Err("must be at least 1") } else { Ok(()) }
            })
            .interact_text()?;

        let current_level = LOG_LEVELS
            .iter()
            .position(|l| *l == self.log_level)
            .unwrap_or(1);
        let level = Select::new()
            .with_prompt("Log level")
            .items(LOG_LEVELS)
            .default(current_level)
            .interact()?;
        self.log_level = LOG_LEVELS[level].to_string();
        Ok(())
    }
}
