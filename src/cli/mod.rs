//! CLI command handlers
//!
//! Bridges the clap argument parsing with the import, storage and report
//! layers.

pub mod audit;
pub mod import;
pub mod report;

pub use audit::handle_audit_command;
pub use import::handle_import_command;
pub use report::{handle_report_command, OutputArgs, ReportCommands};
