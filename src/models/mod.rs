//! Core data models for sheetfin
//!
//! The record model mirrors the three sheets of the finance spreadsheet:
//! transactions, category limits and credit cards. Models carry no
//! reporting logic.

pub mod card;
pub mod category_limit;
pub mod dataset;
pub mod money;
pub mod period;
pub mod transaction;

pub use card::Card;
pub use category_limit::{find_limit, CategoryLimit};
pub use dataset::Dataset;
pub use money::{Money, MoneyParseError};
pub use period::{in_year, month_tokens, PeriodParseError, ReportPeriod};
pub use transaction::{
    DateBasis, Transaction, TransactionKind, TransactionStatus, CARD_BILL_PAYMENT_CATEGORY,
};
