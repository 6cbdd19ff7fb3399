//! Movement List Report
//!
//! The month's transactions by movement date, newest id first.

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{DateBasis, Money, ReportPeriod, Transaction, TransactionKind};
use serde::Serialize;
use std::io::Write;

use super::weekly_budget::csv_field;

/// Transactions incurred in one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementList {
    pub period: ReportPeriod,
    /// Sorted by numeric id, highest first; non-numeric ids count as 0
    pub items: Vec<Transaction>,
    pub total_income: Money,
    pub total_expense: Money,
}

impl MovementList {
    /// Generate the movement list for a month
    pub fn generate(transactions: &[Transaction], period: ReportPeriod) -> Self {
        let mut items: Vec<Transaction> = transactions
            .iter()
            .filter(|t| period.contains(t.date_for(DateBasis::Movement)))
            .cloned()
            .collect();
        // Stable, so equal ids keep their sheet order
        items.sort_by_key(|t| std::cmp::Reverse(t.numeric_id()));

        let mut total_income = Money::zero();
        let mut total_expense = Money::zero();
        for txn in &items {
            match txn.kind_exact() {
                Some(TransactionKind::Income) => total_income += txn.amount,
                Some(TransactionKind::Expense) => total_expense += txn.amount,
                None => {}
            }
        }

        Self {
            period,
            items,
            total_income,
            total_expense,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Movements: {}\n", self.period));
        output.push_str(&"=".repeat(75));
        output.push('\n');

        if self.items.is_empty() {
            output.push_str("No movements in this period.\n");
            return output;
        }

        output.push_str(&crate::display::format_transaction_register(&self.items));
        output.push_str(&"-".repeat(75));
        output.push('\n');
        output.push_str(&format!(
            "{} movements   Income: {}   Expenses: {}\n",
            self.items.len(),
            self.total_income,
            self.total_expense
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SheetfinResult<()> {
        writeln!(
            writer,
            "ID,Movement Date,Payment Date,Kind,Category,Description,Payment Method,Status,Amount"
        )
        .map_err(|e| SheetfinError::Export(e.to_string()))?;

        for txn in &self.items {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{}",
                csv_field(&txn.id),
                txn.movement_date.map(|d| d.to_string()).unwrap_or_default(),
                txn.payment_date.map(|d| d.to_string()).unwrap_or_default(),
                csv_field(&txn.kind),
                csv_field(&txn.category),
                csv_field(&txn.description),
                csv_field(&txn.payment_method),
                csv_field(&txn.status),
                txn.amount.to_decimal_string()
            )
            .map_err(|e| SheetfinError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn movement(id: &str, kind: TransactionKind, cents: i64, m: u32) -> Transaction {
        Transaction::new(id, kind, Money::from_cents(cents))
            .with_movement_date(NaiveDate::from_ymd_opt(2024, m, 10).unwrap())
    }

    #[test]
    fn test_filters_on_movement_date() {
        let mut paid_later = movement("1", TransactionKind::Expense, 100, 3);
        paid_later.payment_date = NaiveDate::from_ymd_opt(2024, 4, 10);
        let transactions = vec![paid_later, movement("2", TransactionKind::Expense, 100, 4)];

        let march = MovementList::generate(&transactions, ReportPeriod::monthly(2024, 3));
        assert_eq!(march.items.len(), 1);
        assert_eq!(march.items[0].id, "1");
    }

    #[test]
    fn test_sorted_by_numeric_id_descending() {
        let transactions = vec![
            movement("9", TransactionKind::Expense, 100, 3),
            movement("abc", TransactionKind::Expense, 100, 3),
            movement("10", TransactionKind::Expense, 100, 3),
            movement("x", TransactionKind::Expense, 100, 3),
            movement("2", TransactionKind::Income, 100, 3),
        ];
        let list = MovementList::generate(&transactions, ReportPeriod::monthly(2024, 3));
        let ids: Vec<&str> = list.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "9", "2", "abc", "x"]);
    }

    #[test]
    fn test_totals_by_kind() {
        let transactions = vec![
            movement("1", TransactionKind::Income, 500000, 3),
            movement("2", TransactionKind::Expense, 12050, 3),
            movement("3", TransactionKind::Expense, 7950, 3),
        ];
        let list = MovementList::generate(&transactions, ReportPeriod::monthly(2024, 3));
        assert_eq!(list.total_income, Money::from_cents(500000));
        assert_eq!(list.total_expense, Money::from_cents(20000));
    }

    #[test]
    fn test_empty_month() {
        let list = MovementList::generate(&[], ReportPeriod::monthly(2024, 3));
        assert!(list.items.is_empty());
        assert!(list.format_terminal().contains("No movements"));
    }
}
