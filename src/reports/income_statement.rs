//! Annual Income Statement (DRE) Report
//!
//! Twelve-month view of receipts and expenses per category, grouped by the
//! month of the payment date.

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{in_year, DateBasis, Money, Transaction, TransactionKind};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use super::weekly_budget::csv_field;

/// Months in a year; averages always divide by this
const MONTHS: usize = 12;

/// One line of the statement: twelve monthly values plus sum and average
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    pub label: String,
    /// Index 0 is January
    pub months: [Money; MONTHS],
    pub total: Money,
    /// total / 12, whatever the number of months with data
    pub average: Money,
}

impl StatementRow {
    fn from_months(label: impl Into<String>, months: [Money; MONTHS]) -> Self {
        let total: Money = months.iter().sum();
        Self {
            label: label.into(),
            months,
            total,
            average: total.div_rounded(MONTHS as f64),
        }
    }
}

/// Annual income statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    pub year: i32,
    /// Income categories, sorted by name
    pub income: Vec<StatementRow>,
    /// Expense categories, sorted by name
    pub expenses: Vec<StatementRow>,
    pub total_income: StatementRow,
    pub total_expense: StatementRow,
    /// total_income - total_expense, per month
    pub monthly_balance: StatementRow,
    /// sum(total_income) - sum(total_expense)
    pub balance_total: Money,
}

impl IncomeStatement {
    /// Generate the income statement for a year
    pub fn generate(transactions: &[Transaction], year: i32) -> Self {
        let mut income: BTreeMap<&str, [Money; MONTHS]> = BTreeMap::new();
        let mut expenses: BTreeMap<&str, [Money; MONTHS]> = BTreeMap::new();
        let mut total_income = [Money::zero(); MONTHS];
        let mut total_expense = [Money::zero(); MONTHS];

        for txn in transactions {
            let date = txn.date_for(DateBasis::Payment);
            if !in_year(date, year) {
                continue;
            }
            let Some(date) = date else { continue };
            let month = date.month0() as usize;

            let (rows, totals) = match txn.kind_exact() {
                Some(TransactionKind::Income) => (&mut income, &mut total_income),
                Some(TransactionKind::Expense) => (&mut expenses, &mut total_expense),
                None => continue,
            };

            rows.entry(txn.category.as_str())
                .or_insert([Money::zero(); MONTHS])[month] += txn.amount;
            totals[month] += txn.amount;
        }

        let mut balance = [Money::zero(); MONTHS];
        for (m, slot) in balance.iter_mut().enumerate() {
            *slot = total_income[m] - total_expense[m];
        }

        let total_income = StatementRow::from_months("Total Receitas", total_income);
        let total_expense = StatementRow::from_months("Total Despesas", total_expense);
        let balance_total = total_income.total - total_expense.total;

        Self {
            year,
            income: income
                .into_iter()
                .map(|(category, months)| StatementRow::from_months(category, months))
                .collect(),
            expenses: expenses
                .into_iter()
                .map(|(category, months)| StatementRow::from_months(category, months))
                .collect(),
            total_income,
            total_expense,
            monthly_balance: StatementRow::from_months("Saldo", balance),
            balance_total,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let width = 22 + 13 * (MONTHS + 2);
        let mut output = String::new();
        output.push_str(&format!("Income Statement (DRE): {}\n", self.year));
        output.push_str(&"=".repeat(width));
        output.push('\n');

        output.push_str(&format!("{:<22}", ""));
        for name in crate::display::MONTH_ABBREVIATIONS {
            output.push_str(&format!(" {:>12}", name));
        }
        output.push_str(&format!(" {:>12} {:>12}\n", "Total", "Average"));

        let render = |output: &mut String, row: &StatementRow| {
            output.push_str(&format!("{:<22}", crate::display::truncate(&row.label, 22)));
            for value in &row.months {
                output.push_str(&format!(" {:>12}", value.to_decimal_string()));
            }
            output.push_str(&format!(
                " {:>12} {:>12}\n",
                row.total.to_decimal_string(),
                row.average.to_decimal_string()
            ));
        };

        output.push_str("\nRECEITAS\n");
        for row in &self.income {
            render(&mut output, row);
        }
        render(&mut output, &self.total_income);

        output.push_str("\nDESPESAS\n");
        for row in &self.expenses {
            render(&mut output, row);
        }
        render(&mut output, &self.total_expense);

        output.push_str(&"-".repeat(width));
        output.push('\n');
        render(&mut output, &self.monthly_balance);
        output.push_str(&format!("\nBalance for {}: {}\n", self.year, self.balance_total));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SheetfinResult<()> {
        let months: Vec<String> = (1..=MONTHS).map(|m| format!("{}-{:02}", self.year, m)).collect();
        writeln!(writer, "Section,Category,{},Total,Average", months.join(","))
            .map_err(|e| SheetfinError::Export(e.to_string()))?;

        let sections: [(&str, &[StatementRow]); 2] =
            [("Income", self.income.as_slice()), ("Expense", self.expenses.as_slice())];
        let totals = [
            ("Total", &self.total_income),
            ("Total", &self.total_expense),
            ("Balance", &self.monthly_balance),
        ];

        let mut write_row = |section: &str, row: &StatementRow| -> SheetfinResult<()> {
            let values: Vec<String> = row.months.iter().map(|v| v.to_decimal_string()).collect();
            writeln!(
                writer,
                "{},{},{},{},{}",
                section,
                csv_field(&row.label),
                values.join(","),
                row.total.to_decimal_string(),
                row.average.to_decimal_string()
            )
            .map_err(|e| SheetfinError::Export(e.to_string()))
        };

        for (section, rows) in sections {
            for row in rows {
                write_row(section, row)?;
            }
        }
        for (section, row) in totals {
            write_row(section, row)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, category: &str, cents: i64, y: i32, m: u32) -> Transaction {
        Transaction::new("1", kind, Money::from_cents(cents))
            .with_category(category)
            .with_payment_date(NaiveDate::from_ymd_opt(y, m, 10).unwrap())
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(TransactionKind::Income, "Salário", 500000, 2024, 1),
            txn(TransactionKind::Income, "Salário", 500000, 2024, 2),
            txn(TransactionKind::Income, "Freela", 120000, 2024, 2),
            txn(TransactionKind::Expense, "Aluguel", 180000, 2024, 1),
            txn(TransactionKind::Expense, "Aluguel", 180000, 2024, 2),
            txn(TransactionKind::Expense, "Mercado", 95050, 2024, 2),
            txn(TransactionKind::Expense, "Mercado", 99999, 2023, 12),
        ]
    }

    #[test]
    fn test_rows_grouped_by_category_and_month() {
        let dre = IncomeStatement::generate(&sample(), 2024);

        let labels: Vec<&str> = dre.income.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Freela", "Salário"]);

        let salary = &dre.income[1];
        assert_eq!(salary.months[0], Money::from_units(5000));
        assert_eq!(salary.months[1], Money::from_units(5000));
        assert_eq!(salary.total, Money::from_units(10000));

        let market = dre.expenses.iter().find(|r| r.label == "Mercado").unwrap();
        assert_eq!(market.total, Money::from_cents(95050));
    }

    #[test]
    fn test_balance_invariants() {
        let dre = IncomeStatement::generate(&sample(), 2024);

        for m in 0..MONTHS {
            assert_eq!(
                dre.total_income.months[m] - dre.total_expense.months[m],
                dre.monthly_balance.months[m]
            );
        }
        let balance_sum: Money = dre.monthly_balance.months.iter().sum();
        assert_eq!(balance_sum, dre.balance_total);
        assert_eq!(dre.balance_total, Money::from_cents(1120000 - 455050));
    }

    #[test]
    fn test_average_divides_by_twelve() {
        let dre = IncomeStatement::generate(&sample(), 2024);
        // 11.200,00 over 12 months, although only two have data
        assert_eq!(dre.total_income.average, Money::from_cents(93333));
        assert_eq!(dre.total_expense.average, Money::from_cents(37921));
    }

    #[test]
    fn test_unknown_kind_and_missing_date_excluded() {
        let mut transfer = txn(TransactionKind::Income, "Transferência", 1000, 2024, 3);
        transfer.kind = "Transferência".to_string();
        let mut undated = txn(TransactionKind::Expense, "Mercado", 1000, 2024, 3);
        undated.payment_date = None;

        let dre = IncomeStatement::generate(&[transfer, undated], 2024);
        assert!(dre.income.is_empty());
        assert!(dre.expenses.is_empty());
        assert!(dre.balance_total.is_zero());
    }

    #[test]
    fn test_export_csv_has_total_rows() {
        let dre = IncomeStatement::generate(&sample(), 2024);
        let mut buffer = Vec::new();
        dre.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with("Section,Category,2024-01,"));
        assert!(csv.contains("\nBalance,Saldo,3200.00,3449.50,"));
    }
}
