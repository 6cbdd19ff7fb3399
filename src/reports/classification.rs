//! Classification Rollup Report
//!
//! Planned-versus-actual spending per classification, where a classification
//! groups several category limits.

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{find_limit, CategoryLimit, Money, ReportPeriod, Transaction};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use super::budget_rule::counts_toward_budget;
use super::weekly_budget::csv_field;

/// Planned versus actual for one classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRow {
    pub classification: String,
    /// Sum of the monthly limits of its categories
    pub planned: Money,
    pub actual: Money,
    /// planned - actual
    pub divergence: Money,
    /// Share of this classification in the total plan (0-100)
    pub percent_of_planned: f64,
}

impl ClassificationRow {
    fn new(classification: &str) -> Self {
        Self {
            classification: classification.to_string(),
            planned: Money::zero(),
            actual: Money::zero(),
            divergence: Money::zero(),
            percent_of_planned: 0.0,
        }
    }
}

/// Classification rollup for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub period: ReportPeriod,
    /// One row per classification, in order of first appearance in the limits
    pub rows: Vec<ClassificationRow>,
    pub total_planned: Money,
    pub total_actual: Money,
}

impl ClassificationReport {
    /// Generate the classification rollup for a month
    pub fn generate(
        transactions: &[Transaction],
        limits: &[CategoryLimit],
        period: ReportPeriod,
    ) -> Self {
        let mut rows: Vec<ClassificationRow> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for limit in limits {
            let i = *index
                .entry(limit.classification.as_str())
                .or_insert_with(|| {
                    rows.push(ClassificationRow::new(&limit.classification));
                    rows.len() - 1
                });
            rows[i].planned += limit.monthly_limit;
        }

        for txn in transactions.iter().filter(|t| counts_toward_budget(t, period)) {
            let Some(limit) = find_limit(limits, &txn.category) else {
                continue;
            };
            if let Some(&i) = index.get(limit.classification.as_str()) {
                rows[i].actual += txn.amount;
            }
        }

        let total_planned: Money = rows.iter().map(|r| r.planned).sum();
        let total_actual: Money = rows.iter().map(|r| r.actual).sum();

        for row in &mut rows {
            row.divergence = row.planned - row.actual;
            row.percent_of_planned = if total_planned.is_positive() {
                row.planned.as_f64() / total_planned.as_f64() * 100.0
            } else {
                0.0
            };
        }

        Self {
            period,
            rows,
            total_planned,
            total_actual,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Classification Summary: {}\n", self.period));
        output.push_str(&"=".repeat(82));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14} {:>14} {:>14} {:>10}\n",
            "Classification", "Planned", "Actual", "Divergence", "% Plan"
        ));
        output.push_str(&"-".repeat(82));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<24} {:>14} {:>14} {:>14} {:>10}\n",
                crate::display::truncate(&row.classification, 24),
                row.planned.to_string(),
                row.actual.to_string(),
                row.divergence.to_string(),
                crate::display::format_percentage(row.percent_of_planned)
            ));
        }

        output.push_str(&"-".repeat(82));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.total_planned.to_string(),
            self.total_actual.to_string(),
            (self.total_planned - self.total_actual).to_string()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SheetfinResult<()> {
        writeln!(writer, "Period,Classification,Planned,Actual,Divergence,Percent")
            .map_err(|e| SheetfinError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{},{:.2}",
                self.period,
                csv_field(&row.classification),
                row.planned.to_decimal_string(),
                row.actual.to_decimal_string(),
                row.divergence.to_decimal_string(),
                row.percent_of_planned
            )
            .map_err(|e| SheetfinError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
