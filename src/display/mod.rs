//! Display formatting for terminal output
//!
//! Provides utilities for formatting records and report cells for terminal
//! display.

pub mod config;
pub mod report;
pub mod transaction;

pub use config::{format_card_list, format_limit_list};
pub use report::{format_percentage, separator, truncate, MONTH_ABBREVIATIONS};
pub use transaction::{format_transaction_register, format_transaction_row};
