//! The imported record set
//!
//! A dataset is the read-only snapshot every report works from. It is
//! replaced whole when a new spreadsheet is imported, never edited in place.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::category_limit::CategoryLimit;
use super::transaction::Transaction;

/// Transactions plus the two configuration sheets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
    pub category_limits: Vec<CategoryLimit>,
    pub cards: Vec<Card>,
}

impl Dataset {
    /// Create a dataset from its three parts
    pub fn new(
        transactions: Vec<Transaction>,
        category_limits: Vec<CategoryLimit>,
        cards: Vec<Card>,
    ) -> Self {
        Self {
            transactions,
            category_limits,
            cards,
        }
    }

    /// True when nothing has been imported
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.category_limits.is_empty() && self.cards.is_empty()
    }

    /// Look up a card by exact name
    pub fn card(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.name == name)
    }
}
