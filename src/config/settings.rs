//! User settings for sheetfin
//!
//! Display preferences and the card the statement report falls back to.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::SheetfinPaths;
use crate::error::SheetfinError;

/// User settings, stored as `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Card used by `report statement` when none is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_card: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_card: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SheetfinPaths) -> Result<Self, SheetfinError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SheetfinError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SheetfinError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that cannot be applied, such as a malformed date format
    pub fn validate(&self) -> Result<(), SheetfinError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(SheetfinError::Config(format!(
                "Invalid date format: {}",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Render a date with the configured format
    pub fn format_date(&self, date: NaiveDate) -> Result<String, SheetfinError> {
        use std::fmt::Write;

        let mut rendered = String::new();
        write!(rendered, "{}", date.format(&self.date_format)).map_err(|_| {
            SheetfinError::Config(format!("Invalid date format: {}", self.date_format))
        })?;
        Ok(rendered)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SheetfinPaths) -> Result<(), SheetfinError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SheetfinError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SheetfinError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
