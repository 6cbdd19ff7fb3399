//! Audit entry data structures
//!
//! One entry per dataset import, with the record counts before and after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Dataset;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// First import into an empty store
    Import,
    /// Import over an existing dataset
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Import => write!(f, "IMPORT"),
            Operation::Replace => write!(f, "REPLACE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Where the data came from, usually the sheet directory
    pub source: String,

    pub transactions: usize,
    pub category_limits: usize,
    pub cards: usize,

    /// Transaction count of the dataset that was replaced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_transactions: Option<usize>,
}

impl AuditEntry {
    /// Entry for `next` replacing `previous`
    pub fn import(source: impl Into<String>, previous: &Dataset, next: &Dataset) -> Self {
        let (operation, previous_transactions) = if previous.is_empty() {
            (Operation::Import, None)
        } else {
            (Operation::Replace, Some(previous.transactions.len()))
        };

        Self {
            timestamp: Utc::now(),
            operation,
            source: source.into(),
            transactions: next.transactions.len(),
            category_limits: next.category_limits.len(),
            cards: next.cards.len(),
            previous_transactions,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} ({} transactions, {} limits, {} cards)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.source,
            self.transactions,
            self.category_limits,
            self.cards
        );

        if let Some(previous) = self.previous_transactions {
            output.push_str(&format!("\n  Replaced {} transactions", previous));
        }

        output
    }
}
