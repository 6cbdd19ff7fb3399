//! Weekly Budget Report
//!
//! For every category with a monthly limit, compares the limit against real
//! spending in the month and splits that spending into up to five week
//! buckets.

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{CategoryLimit, Money, ReportPeriod, Transaction};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use super::budget_rule::counts_toward_budget;

/// Average number of weeks in a month
pub const WEEKS_PER_MONTH: f64 = 4.3;

/// Number of week buckets in a month
pub const WEEK_BUCKETS: usize = 5;

/// Budget tracking for a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyBudgetItem {
    pub category: String,
    pub monthly_limit: Money,
    /// Real spending in the month
    pub actual: Money,
    /// monthly_limit / 4.3, rounded to the cent
    pub weekly_limit: Money,
    /// monthly_limit - actual; positive means under budget
    pub divergence: Money,
    /// Spending per week, index 0 is week 1
    pub weeks: [Money; WEEK_BUCKETS],
}

impl WeeklyBudgetItem {
    fn new(limit: &CategoryLimit) -> Self {
        Self {
            category: limit.category.clone(),
            monthly_limit: limit.monthly_limit,
            actual: Money::zero(),
            weekly_limit: limit.monthly_limit.div_rounded(WEEKS_PER_MONTH),
            divergence: Money::zero(),
            weeks: [Money::zero(); WEEK_BUCKETS],
        }
    }

    /// Spending for week `week` (1-5)
    pub fn week(&self, week: usize) -> Money {
        self.weeks.get(week.wrapping_sub(1)).copied().unwrap_or_default()
    }

    /// Check if this category went over its monthly limit
    pub fn is_over_budget(&self) -> bool {
        self.divergence.is_negative()
    }
}

/// Weekly budget tracking for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyBudgetReport {
    pub period: ReportPeriod,
    /// One item per category limit, in configuration order
    pub items: Vec<WeeklyBudgetItem>,
}

impl WeeklyBudgetReport {
    /// Generate the weekly budget report for a month
    pub fn generate(
        transactions: &[Transaction],
        limits: &[CategoryLimit],
        period: ReportPeriod,
    ) -> Self {
        let mut items: Vec<WeeklyBudgetItem> = Vec::with_capacity(limits.len());
        let mut index: HashMap<&str, usize> = HashMap::new();

        for limit in limits {
            match index.get(limit.category.as_str()) {
                Some(&i) => items[i] = WeeklyBudgetItem::new(limit),
                None => {
                    index.insert(limit.category.as_str(), items.len());
                    items.push(WeeklyBudgetItem::new(limit));
                }
            }
        }

        let mut dropped = 0usize;
        for txn in transactions.iter().filter(|t| counts_toward_budget(t, period)) {
            let Some(&i) = index.get(txn.category.as_str()) else {
                continue;
            };
            let item = &mut items[i];
            item.actual += txn.amount;

            match week_bucket(txn) {
                Some(week) => item.weeks[week - 1] += txn.amount,
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(period = %period, dropped, "spending outside week buckets 1-5");
        }

        for item in &mut items {
            item.divergence = item.monthly_limit - item.actual;
        }

        Self { period, items }
    }

    /// Sum of all monthly limits
    pub fn total_limit(&self) -> Money {
        self.items.iter().map(|i| i.monthly_limit).sum()
    }

    /// Sum of all real spending
    pub fn total_actual(&self) -> Money {
        self.items.iter().map(|i| i.actual).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Weekly Budget: {}\n", self.period));
        output.push_str(&"=".repeat(132));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>13} {:>13} {:>12} {:>12} {:>12} {:>12} {:>12} {:>13}\n",
            "Category", "Limit", "Weekly", "Week 1", "Week 2", "Week 3", "Week 4", "Week 5", "Actual"
        ));
        output.push_str(&"-".repeat(132));
        output.push('\n');

        for item in &self.items {
            output.push_str(&format!(
                "{:<20} {:>13} {:>13}",
                crate::display::truncate(&item.category, 20),
                item.monthly_limit.to_string(),
                item.weekly_limit.to_string()
            ));
            for week in &item.weeks {
                output.push_str(&format!(" {:>12}", week.to_string()));
            }
            let marker = if item.is_over_budget() { " !" } else { "" };
            output.push_str(&format!(" {:>13}{}\n", item.actual.to_string(), marker));
        }

        output.push_str(&"-".repeat(132));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>13} {:>13} {:>12} {:>12} {:>12} {:>12} {:>12} {:>13}\n",
            "TOTAL",
            self.total_limit().to_string(),
            "",
            "",
            "",
            "",
            "",
            "",
            self.total_actual().to_string()
        ));
        output.push_str(&format!(
            "Divergence: {}\n",
            self.total_limit() - self.total_actual()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SheetfinResult<()> {
        writeln!(
            writer,
            "Period,Category,Monthly Limit,Weekly Limit,Week 1,Week 2,Week 3,Week 4,Week 5,Actual,Divergence"
        )
        .map_err(|e| SheetfinError::Export(e.to_string()))?;

        for item in &self.items {
            let weeks: Vec<String> = item.weeks.iter().map(|w| w.to_decimal_string()).collect();
            writeln!(
                writer,
                "{},{},{},{},{},{},{}",
                self.period,
                csv_field(&item.category),
                item.monthly_limit.to_decimal_string(),
                item.weekly_limit.to_decimal_string(),
                weeks.join(","),
                item.actual.to_decimal_string(),
                item.divergence.to_decimal_string()
            )
            .map_err(|e| SheetfinError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

/// Week number (1-5) of a transaction, or `None` when it falls outside
///
/// The sheet's own week label wins when its digits form a number; otherwise the
/// calendar week of the movement date is used. Out-of-range weeks are dropped,
/// never clamped.
pub fn week_bucket(txn: &Transaction) -> Option<usize> {
    let week = parse_week_label(&txn.week_of_month)
        .or_else(|| txn.movement_date.map(calendar_week_of_month))?;

    if (1..=WEEK_BUCKETS as u32).contains(&week) {
        Some(week as usize)
    } else {
        None
    }
}

/// Digits of a label such as "Semana 3"
pub fn parse_week_label(label: &str) -> Option<u32> {
    let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Sunday-start week of the month: `floor((day + offset - 1) / 7) + 1`, where
/// `offset` is the weekday of the 1st (Sunday = 0). Can return 6.
pub fn calendar_week_of_month(date: NaiveDate) -> u32 {
    let offset = date
        .with_day(1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0);
    (date.day() + offset - 1) / 7 + 1
}

pub(crate) fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: &str, category: &str, cents: i64, on: NaiveDate) -> Transaction {
        Transaction::new(id, TransactionKind::Expense, Money::from_cents(cents))
            .with_movement_date(on)
            .with_category(category)
            .with_status("Pago")
    }

    fn limits() -> Vec<CategoryLimit> {
        vec![
            CategoryLimit::new("Grocery", "Essential", Money::from_units(860)),
            CategoryLimit::new("Leisure", "Lifestyle", Money::from_units(300)),
        ]
    }

    #[test]
    fn test_category_without_transactions() {
        let report = WeeklyBudgetReport::generate(&[], &limits(), ReportPeriod::monthly(2024, 5));

        let grocery = &report.items[0];
        assert_eq!(grocery.category, "Grocery");
        assert!(grocery.actual.is_zero());
        assert_eq!(grocery.divergence, Money::from_units(860));
        assert_eq!(grocery.weekly_limit, Money::from_units(200));
        assert!(grocery.weeks.iter().all(|w| w.is_zero()));
    }

    #[test]
    fn test_week_label_takes_precedence() {
        // 2024-05-02 is calendar week 1, but the sheet says week 3
        let txn = expense("1", "Grocery", 5000, date(2024, 5, 2)).with_week_label("Semana 3");
        let report =
            WeeklyBudgetReport::generate(&[txn], &limits(), ReportPeriod::monthly(2024, 5));

        let grocery = &report.items[0];
        assert_eq!(grocery.week(3), Money::from_cents(5000));
        assert!(grocery.week(1).is_zero());
        assert_eq!(grocery.actual, Money::from_cents(5000));
        assert_eq!(grocery.divergence, Money::from_cents(86000 - 5000));
    }

    #[test]
    fn test_calendar_week_fallback() {
        // May 2024 starts on a Wednesday (offset 3): the 5th is a Sunday, week 2
        assert_eq!(calendar_week_of_month(date(2024, 5, 4)), 1);
        assert_eq!(calendar_week_of_month(date(2024, 5, 5)), 2);
        assert_eq!(calendar_week_of_month(date(2024, 5, 31)), 5);

        let txn = expense("1", "Leisure", 1200, date(2024, 5, 5)).with_week_label("Semana");
        let report =
            WeeklyBudgetReport::generate(&[txn], &limits(), ReportPeriod::monthly(2024, 5));
        assert_eq!(report.items[1].week(2), Money::from_cents(1200));
    }

    #[test]
    fn test_sixth_calendar_week_is_dropped_not_clamped() {
        // March 2024 starts on a Friday (offset 5): the 31st lands in week 6
        assert_eq!(calendar_week_of_month(date(2024, 3, 31)), 6);

        let txn = expense("1", "Grocery", 7000, date(2024, 3, 31));
        let report =
            WeeklyBudgetReport::generate(&[txn], &limits(), ReportPeriod::monthly(2024, 3));

        let grocery = &report.items[0];
        assert_eq!(grocery.actual, Money::from_cents(7000));
        assert!(grocery.weeks.iter().all(|w| w.is_zero()));
    }

    #[test]
    fn test_out_of_range_label_is_dropped() {
        let txn = expense("1", "Grocery", 1000, date(2024, 5, 2)).with_week_label("Semana 7");
        let report =
            WeeklyBudgetReport::generate(&[txn], &limits(), ReportPeriod::monthly(2024, 5));
        assert_eq!(report.items[0].actual, Money::from_cents(1000));
        assert!(report.items[0].weeks.iter().all(|w| w.is_zero()));
    }

    #[test]
    fn test_inclusion_and_exclusion_paths() {
        let may = date(2024, 5, 10);
        let mut income = expense("4", "Grocery", 100, may);
        income.kind = "Receita".to_string();

        let transactions = vec![
            expense("1", "Grocery", 1000, may),
            expense("2", "Grocery", 2000, may).with_status("Faturado"),
            expense("3", "Grocery", 4000, may).with_status("Pendente"),
            income,
            expense("5", "Pagamento de Fatura", 8000, may),
            expense("6", "Unlisted", 16000, may),
            expense("7", "Grocery", 32000, date(2024, 6, 1)),
        ];

        let report =
            WeeklyBudgetReport::generate(&transactions, &limits(), ReportPeriod::monthly(2024, 5));
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].actual, Money::from_cents(3000));
        assert!(report.items[1].actual.is_zero());
    }

    #[test]
    fn test_over_budget_and_totals() {
        let txn = expense("1", "Leisure", 35000, date(2024, 5, 20));
        let report =
            WeeklyBudgetReport::generate(&[txn], &limits(), ReportPeriod::monthly(2024, 5));

        assert!(report.items[1].is_over_budget());
        assert_eq!(report.items[1].divergence, Money::from_units(-50));
        assert_eq!(report.total_limit(), Money::from_units(1160));
        assert_eq!(report.total_actual(), Money::from_units(350));
    }

    #[test]
    fn test_idempotent() {
        let transactions = vec![expense("1", "Grocery", 999, date(2024, 5, 9))];
        let period = ReportPeriod::monthly(2024, 5);
        assert_eq!(
            WeeklyBudgetReport::generate(&transactions, &limits(), period),
            WeeklyBudgetReport::generate(&transactions, &limits(), period)
        );
    }

    #[test]
    fn test_export_csv_quotes_commas() {
        let limits = vec![CategoryLimit::new("Casa, reparos", "Essential", Money::from_units(43))];
        let report = WeeklyBudgetReport::generate(&[], &limits, ReportPeriod::monthly(2024, 5));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.contains("2024-05,\"Casa, reparos\",43.00,10.00,0.00,0.00,0.00,0.00,0.00,0.00,43.00"));
    }
}
