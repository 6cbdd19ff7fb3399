//! Monthly Summary Report
//!
//! Cash-flow view of one month: receipts, expenses and balance of every
//! transaction whose payment date falls in the month.

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{DateBasis, Money, ReportPeriod, Transaction, TransactionKind};
use serde::Serialize;
use std::io::Write;

/// Receipts, expenses and balance for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub period: ReportPeriod,
    pub receipts: Money,
    pub expenses: Money,
    /// receipts - expenses
    pub balance: Money,
}

impl MonthlySummary {
    /// Generate the summary for a month
    pub fn generate(transactions: &[Transaction], period: ReportPeriod) -> Self {
        let mut receipts = Money::zero();
        let mut expenses = Money::zero();

        for txn in transactions
            .iter()
            .filter(|t| period.contains(t.date_for(DateBasis::Payment)))
        {
            match txn.kind_exact() {
                Some(TransactionKind::Income) => receipts += txn.amount,
                Some(TransactionKind::Expense) => expenses += txn.amount,
                None => {}
            }
        }

        Self {
            period,
            receipts,
            expenses,
            balance: receipts - expenses,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Monthly Summary: {}\n", self.period));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>18}\n", "Receipts", self.receipts.to_string()));
        output.push_str(&format!("{:<20} {:>18}\n", "Expenses", self.expenses.to_string()));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>18}\n", "Balance", self.balance.to_string()));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SheetfinResult<()> {
        writeln!(writer, "Period,Receipts,Expenses,Balance")
            .map_err(|e| SheetfinError::Export(e.to_string()))?;
        writeln!(
            writer,
            "{},{},{},{}",
            self.period,
            self.receipts.to_decimal_string(),
            self.expenses.to_decimal_string(),
            self.balance.to_decimal_string()
        )
        .map_err(|e| SheetfinError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_receipts_expenses_and_balance() {
        let transactions = vec![
            Transaction::new("1", TransactionKind::Income, Money::from_units(1000))
                .with_payment_date(date(2024, 3, 10)),
            Transaction::new("2", TransactionKind::Expense, Money::from_units(400))
                .with_payment_date(date(2024, 3, 15)),
        ];

        let summary = MonthlySummary::generate(&transactions, ReportPeriod::monthly(2024, 3));
        assert_eq!(summary.receipts, Money::from_units(1000));
        assert_eq!(summary.expenses, Money::from_units(400));
        assert_eq!(summary.balance, Money::from_units(600));
    }

    #[test]
    fn test_filters_on_payment_date() {
        let transactions = vec![
            // incurred in March, paid in April
            Transaction::new("1", TransactionKind::Expense, Money::from_units(250))
                .with_movement_date(date(2024, 3, 28))
                .with_payment_date(date(2024, 4, 5)),
            // no payment date at all
            Transaction::new("2", TransactionKind::Expense, Money::from_units(99))
                .with_movement_date(date(2024, 3, 2)),
        ];

        let march = MonthlySummary::generate(&transactions, ReportPeriod::monthly(2024, 3));
        assert!(march.expenses.is_zero());

        let april = MonthlySummary::generate(&transactions, ReportPeriod::monthly(2024, 4));
        assert_eq!(april.expenses, Money::from_units(250));
    }

    #[test]
    fn test_unknown_kind_is_excluded() {
        let mut transfer = Transaction::new("1", TransactionKind::Income, Money::from_units(50))
            .with_payment_date(date(2024, 3, 1));
        transfer.kind = "Transferência".to_string();
        let mut lowercase = transfer.clone();
        lowercase.kind = "receita".to_string();

        let summary =
            MonthlySummary::generate(&[transfer, lowercase], ReportPeriod::monthly(2024, 3));
        assert!(summary.receipts.is_zero());
        assert!(summary.expenses.is_zero());
    }

    #[test]
    fn test_empty_input_yields_zeros() {
        let summary = MonthlySummary::generate(&[], ReportPeriod::monthly(2024, 1));
        assert!(summary.receipts.is_zero());
        assert!(summary.expenses.is_zero());
        assert!(summary.balance.is_zero());
    }

    #[test]
    fn test_export_csv() {
        let transactions = vec![Transaction::new("1", TransactionKind::Income, Money::from_cents(150050))
            .with_payment_date(date(2024, 3, 10))];
        let summary = MonthlySummary::generate(&transactions, ReportPeriod::monthly(2024, 3));

        let mut buffer = Vec::new();
        summary.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv, "Period,Receipts,Expenses,Balance\n2024-03,1500.50,0.00,1500.50\n");
    }
}
