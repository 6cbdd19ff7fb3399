//! Card Statement Report
//!
//! Everything billed to one card in one statement. Membership comes from
//! the transaction's billing reference (`YYYY-MM`), never from closing dates.

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{DateBasis, Money, ReportPeriod, Transaction};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use super::category_breakdown::CategoryBreakdown;
use super::weekly_budget::csv_field;

/// One card's statement for one billing month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardStatement {
    pub card: String,
    pub period: ReportPeriod,
    /// The `YYYY-MM` billing reference the items were matched on
    pub payment_reference: String,
    /// Most recent movement first; undated items last
    pub items: Vec<Transaction>,
    pub total: Money,
    pub breakdown: CategoryBreakdown,
}

impl CardStatement {
    /// Generate the statement of `card` for `period`
    pub fn generate(transactions: &[Transaction], card: &str, period: ReportPeriod) -> Self {
        let payment_reference = period.payment_reference();

        let mut items: Vec<Transaction> = transactions
            .iter()
            .filter(|t| t.payment_method == card && t.payment_reference == payment_reference)
            .cloned()
            .collect();

        // Undated items sort as the epoch
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
        items.sort_by(|a, b| {
            let a = a.date_for(DateBasis::Movement).unwrap_or(epoch);
            let b = b.date_for(DateBasis::Movement).unwrap_or(epoch);
            b.cmp(&a)
        });

        let total = items.iter().map(|t| t.amount).sum();
        let breakdown = CategoryBreakdown::from_transactions(&items);

        Self {
            card: card.to_string(),
            period,
            payment_reference,
            items,
            total,
            breakdown,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Card Statement: {} ({})\n",
            self.card, self.payment_reference
        ));
        output.push_str(&"=".repeat(75));
        output.push('\n');
        output.push_str(&crate::display::format_transaction_register(&self.items));
        output.push_str(&"-".repeat(75));
        output.push('\n');
        output.push_str(&format!(
            "{:<59} {:>14}\n",
            format!("TOTAL ({} items)", self.items.len()),
            self.total.to_string()
        ));

        if !self.breakdown.categories.is_empty() {
            output.push_str("\nBy category\n");
            output.push_str(&self.breakdown.format_terminal());
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SheetfinResult<()> {
        writeln!(
            writer,
            "Card,Reference,ID,Movement Date,Category,Description,Installment,Status,Amount"
        )
        .map_err(|e| SheetfinError::Export(e.to_string()))?;

        for txn in &self.items {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{}",
                csv_field(&self.card),
                self.payment_reference,
                csv_field(&txn.id),
                txn.movement_date.map(|d| d.to_string()).unwrap_or_default(),
                csv_field(&txn.category),
                csv_field(&txn.description),
                csv_field(&txn.installment_number),
                csv_field(&txn.status),
                txn.amount.to_decimal_string()
            )
            .map_err(|e| SheetfinError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
