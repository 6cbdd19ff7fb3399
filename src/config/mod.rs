//! Configuration module for sheetfin
//!
//! Path resolution for the data directory and persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::SheetfinPaths;
pub use settings::Settings;
