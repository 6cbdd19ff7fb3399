//! sheetfin - reports over a personal-finance spreadsheet
//!
//! Imports the transaction, category-limit and card sheets of a
//! personal-finance spreadsheet and derives monthly and annual views from
//! them: cash summary, weekly budget tracking, classification rollup,
//! income statement (DRE), card statements, the annual card view and
//! pending payments.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Record model (transactions, category limits, cards, money, periods)
//! - `import`: CSV sheet readers and cell normalization
//! - `storage`: JSON file store
//! - `audit`: Import history
//! - `reports`: The aggregators; pure functions over a dataset
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetfin::models::ReportPeriod;
//! use sheetfin::reports::MonthlySummary;
//!
//! let dataset = sheetfin::import::import_dir(Path::new("planilha"))?;
//! let summary = MonthlySummary::generate(&dataset.transactions, ReportPeriod::monthly(2024, 3));
//! println!("{}", summary.format_terminal());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod import;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{SheetfinError, SheetfinResult};

use std::sync::Once;

/// Environment variable holding the log filter (e.g. `debug`, `sheetfin=info`)
pub const LOG_ENV: &str = "SHEETFIN_LOG";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber; logs go to stderr
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
