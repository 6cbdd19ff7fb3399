//! Category limit model
//!
//! One row of the `Despesas` sheet: the monthly spending limit of a category
//! and the classification it rolls up into.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLimit {
    /// Category name, matched against `Transaction::category`
    pub category: String,

    /// Higher-level grouping used by the classification rollup
    pub classification: String,

    pub monthly_limit: Money,

    /// Free-text examples of what belongs in the category
    #[serde(default)]
    pub examples: String,
}

impl CategoryLimit {
    /// Create a new category limit
    pub fn new(
        category: impl Into<String>,
        classification: impl Into<String>,
        monthly_limit: Money,
    ) -> Self {
        Self {
            category: category.into(),
            classification: classification.into(),
            monthly_limit,
            examples: String::new(),
        }
    }
}

impl fmt::Display for CategoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.category, self.classification, self.monthly_limit
        )
    }
}

/// Find the limit entry for a category, if one exists
pub fn find_limit<'a>(limits: &'a [CategoryLimit], category: &str) -> Option<&'a CategoryLimit> {
    limits.iter().find(|l| l.category == category)
}
