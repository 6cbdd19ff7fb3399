//! Pending Expenses Report
//!
//! Category by month matrix of expenses still waiting to be paid, keyed by
//! the `YYYY-MM` token of the payment date.

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{
    in_year, month_tokens, DateBasis, Money, ReportPeriod, Transaction, TransactionKind,
    TransactionStatus,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use super::weekly_budget::csv_field;

/// Pending expense: status "pendente" and kind "despesa", both matched
/// after trimming and case folding
fn is_pending_expense(txn: &Transaction) -> bool {
    txn.status_lenient() == Some(TransactionStatus::Pending)
        && txn.kind_lenient() == Some(TransactionKind::Expense)
}

/// Pending expenses for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingReport {
    pub year: i32,
    /// Categories with pending amounts, sorted by name
    pub categories: Vec<String>,
    /// Every month token of the year, `YYYY-01` first
    pub months: Vec<String>,
    /// category -> month token -> amount
    pub values: BTreeMap<String, BTreeMap<String, Money>>,
    /// Has an entry for all twelve tokens, zero included
    pub total_by_month: BTreeMap<String, Money>,
    pub total_by_category: BTreeMap<String, Money>,
    pub grand_total: Money,
}

impl PendingReport {
    /// Generate the pending matrix of a year
    pub fn generate(transactions: &[Transaction], year: i32) -> Self {
        let months = month_tokens(year);
        let mut total_by_month: BTreeMap<String, Money> =
            months.iter().map(|m| (m.clone(), Money::zero())).collect();
        let mut values: BTreeMap<String, BTreeMap<String, Money>> = BTreeMap::new();
        let mut total_by_category: BTreeMap<String, Money> = BTreeMap::new();
        let mut grand_total = Money::zero();

        for txn in transactions.iter().filter(|t| is_pending_expense(t)) {
            let date = txn.date_for(DateBasis::Payment);
            if !in_year(date, year) {
                continue;
            }
            let Some(date) = date else { continue };
            let token = ReportPeriod::monthly(date.year(), date.month()).to_string();

            *values
                .entry(txn.category.clone())
                .or_default()
                .entry(token.clone())
                .or_default() += txn.amount;
            *total_by_month.entry(token).or_default() += txn.amount;
            *total_by_category.entry(txn.category.clone()).or_default() += txn.amount;
            grand_total += txn.amount;
        }

        Self {
            year,
            categories: values.keys().cloned().collect(),
            months,
            values,
            total_by_month,
            total_by_category,
            grand_total,
        }
    }

    /// Pending amount of `category` in `month`, zero when there is none
    pub fn value(&self, category: &str, month: &str) -> Money {
        self.values
            .get(category)
            .and_then(|by_month| by_month.get(month))
            .copied()
            .unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let width = 22 + 13 * 13;
        let mut output = String::new();
        output.push_str(&format!("Pending Expenses: {}\n", self.year));
        output.push_str(&"=".repeat(width));
        output.push('\n');

        output.push_str(&format!("{:<22}", "Category"));
        for name in crate::display::MONTH_ABBREVIATIONS {
            output.push_str(&format!(" {:>12}", name));
        }
        output.push_str(&format!(" {:>12}\n", "Total"));
        output.push_str(&"-".repeat(width));
        output.push('\n');

        for category in &self.categories {
            output.push_str(&format!("{:<22}", crate::display::truncate(category, 22)));
            for month in &self.months {
                output.push_str(&format!(
                    " {:>12}",
                    self.value(category, month).to_decimal_string()
                ));
            }
            let total = self
                .total_by_category
                .get(category)
                .copied()
                .unwrap_or_default();
            output.push_str(&format!(" {:>12}\n", total.to_decimal_string()));
        }

        output.push_str(&"-".repeat(width));
        output.push('\n');
        output.push_str(&format!("{:<22}", "TOTAL"));
        for month in &self.months {
            let total = self.total_by_month.get(month).copied().unwrap_or_default();
            output.push_str(&format!(" {:>12}", total.to_decimal_string()));
        }
        output.push_str(&format!(" {:>12}\n", self.grand_total.to_decimal_string()));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SheetfinResult<()> {
        writeln!(writer, "Category,{},Total", self.months.join(","))
            .map_err(|e| SheetfinError::Export(e.to_string()))?;

        for category in &self.categories {
            let values: Vec<String> = self
                .months
                .iter()
                .map(|m| self.value(category, m).to_decimal_string())
                .collect();
            let total = self
                .total_by_category
                .get(category)
                .copied()
                .unwrap_or_default();
            writeln!(
                writer,
                "{},{},{}",
                csv_field(category),
                values.join(","),
                total.to_decimal_string()
            )
            .map_err(|e| SheetfinError::Export(e.to_string()))?;
        }

        let totals: Vec<String> = self
            .months
            .iter()
            .map(|m| {
                self.total_by_month
                    .get(m)
                    .copied()
                    .unwrap_or_default()
                    .to_decimal_string()
            })
            .collect();
        writeln!(
            writer,
            "TOTAL,{},{}",
            totals.join(","),
            self.grand_total.to_decimal_string()
        )
        .map_err(|e| SheetfinError::Export(e.to_string()))?;

        Ok(())
    }
}

/// Sum of every pending expense due on or before `today`, whatever the year
pub fn current_pending_total(transactions: &[Transaction], today: NaiveDate) -> Money {
    transactions
        .iter()
        .filter(|t| is_pending_expense(t))
        .filter(|t| matches!(t.payment_date, Some(date) if date <= today))
        .map(|t| t.amount)
        .sum()
}
