//! Reports module for sheetfin
//!
//! Every report is a pure function of the dataset and an explicit period or
//! year. Reports never fail; absent or malformed values are simply left out.

pub mod annual_cards;
pub mod budget_rule;
pub mod card_statement;
pub mod category_breakdown;
pub mod classification;
pub mod income_statement;
pub mod monthly_summary;
pub mod movements;
pub mod pending;
pub mod weekly_budget;

pub use annual_cards::{AnnualCardView, CardMonth, CardYear};
pub use budget_rule::counts_toward_budget;
pub use card_statement::CardStatement;
pub use category_breakdown::{CategoryBreakdown, CategoryShare};
pub use classification::{ClassificationReport, ClassificationRow};
pub use income_statement::{IncomeStatement, StatementRow};
pub use monthly_summary::MonthlySummary;
pub use movements::MovementList;
pub use pending::{current_pending_total, PendingReport};
pub use weekly_budget::{WeeklyBudgetItem, WeeklyBudgetReport};
