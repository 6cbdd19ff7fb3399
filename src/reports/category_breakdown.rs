//! Category Breakdown
//!
//! Totals, counts and shares per category over an arbitrary list of
//! transactions, largest first. Used for the card statement chart.

use crate::models::{Money, Transaction};
use serde::Serialize;
use std::collections::HashMap;

/// Spending of one category within the list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Share of the list's grand total (0-100)
    pub percentage: f64,
}

/// Per-category breakdown of a transaction list
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryBreakdown {
    /// Sorted by total, largest first; ties keep first-seen order
    pub categories: Vec<CategoryShare>,
    pub grand_total: Money,
}

impl CategoryBreakdown {
    /// Group a list of transactions by category
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut categories: Vec<CategoryShare> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for txn in transactions {
            let i = *index.entry(txn.category.as_str()).or_insert_with(|| {
                categories.push(CategoryShare {
                    category: txn.category.clone(),
                    total: Money::zero(),
                    count: 0,
                    percentage: 0.0,
                });
                categories.len() - 1
            });
            categories[i].total += txn.amount;
            categories[i].count += 1;
        }

        let grand_total: Money = categories.iter().map(|c| c.total).sum();
        for share in &mut categories {
            share.percentage = if grand_total.is_positive() {
                share.total.as_f64() / grand_total.as_f64() * 100.0
            } else {
                0.0
            };
        }

        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            categories,
            grand_total,
        }
    }

    /// Format the breakdown for terminal display
    pub fn format_terminal(&self) -> String {
        if self.categories.is_empty() {
            return String::new();
        }

        let max = self
            .categories
            .first()
            .map(|c| c.total.as_f64())
            .unwrap_or(0.0);

        let mut output = String::new();
        for share in &self.categories {
            let filled = if max > 0.0 {
                ((share.total.as_f64() / max) * 20.0).round() as usize
            } else {
                0
            };
            output.push_str(&format!(
                "{:<20} {:<20} {:>14} {:>4}x {:>7}\n",
                crate::display::truncate(&share.category, 20),
                "█".repeat(filled.min(20)),
                share.total.to_string(),
                share.count,
                crate::display::format_percentage(share.percentage)
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn purchase(category: &str, cents: i64) -> Transaction {
        Transaction::new("1", TransactionKind::Expense, Money::from_cents(cents))
            .with_category(category)
    }

    #[test]
    fn test_groups_and_sorts_largest_first() {
        let transactions = vec![
            purchase("Mercado", 3000),
            purchase("Farmácia", 1000),
            purchase("Mercado", 4000),
            purchase("Restaurante", 2000),
        ];

        let breakdown = CategoryBreakdown::from_transactions(&transactions);
        let names: Vec<&str> = breakdown
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, vec!["Mercado", "Restaurante", "Farmácia"]);
        assert_eq!(breakdown.categories[0].count, 2);
        assert_eq!(breakdown.grand_total, Money::from_cents(10000));
        assert!((breakdown.categories[0].percentage - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list() {
        let empty: Vec<Transaction> = Vec::new();
        let breakdown = CategoryBreakdown::from_transactions(&empty);
        assert!(breakdown.categories.is_empty());
        assert!(breakdown.grand_total.is_zero());
        assert_eq!(breakdown.format_terminal(), "");
    }

    #[test]
    fn test_zero_total_yields_zero_percentages() {
        let transactions = vec![purchase("Estorno", 0)];
        let breakdown = CategoryBreakdown::from_transactions(&transactions);
        assert_eq!(breakdown.categories[0].percentage, 0.0);
    }
}
