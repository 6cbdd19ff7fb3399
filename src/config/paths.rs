//! Path management for sheetfin
//!
//! ## Path Resolution Order
//!
//! 1. `SHEETFIN_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/sheetfin` or `~/.config/sheetfin`
//! 3. Windows: `%APPDATA%\sheetfin`

use std::path::{Path, PathBuf};

use crate::error::SheetfinError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SHEETFIN_DATA_DIR";

/// Manages all paths used by sheetfin
#[derive(Debug, Clone)]
pub struct SheetfinPaths {
    base_dir: PathBuf,
}

impl SheetfinPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home directory is available.
    pub fn new() -> Result<Self, SheetfinError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SheetfinPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the JSON store (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SheetfinError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SheetfinError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SheetfinError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SheetfinError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                SheetfinError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("sheetfin"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SheetfinError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SheetfinError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("sheetfin"))
}
