//! Annual Card View Report
//!
//! Per-card paid/pending/total matrix over the twelve months of a year,
//! bucketed by payment date. Only money that is paid, billed or pending is
//! counted; anything with another status stays out of every total.

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::{in_year, Card, DateBasis, Money, Transaction, TransactionStatus};
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

use super::weekly_budget::csv_field;

/// Paid, pending and total for one cell of the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CardMonth {
    pub paid: Money,
    pub pending: Money,
    /// paid + pending
    pub total: Money,
}

impl CardMonth {
    fn add(&mut self, bucket: CardBucket, amount: Money) {
        match bucket {
            CardBucket::Paid => self.paid += amount,
            CardBucket::Pending => self.pending += amount,
        }
        self.total += amount;
    }
}

/// One card's year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardYear {
    pub card: String,
    /// Index 0 is January
    pub months: [CardMonth; 12],
    pub total_paid: Money,
    pub total_pending: Money,
    pub total: Money,
}

impl CardYear {
    fn new(card: &str) -> Self {
        Self {
            card: card.to_string(),
            months: [CardMonth::default(); 12],
            total_paid: Money::zero(),
            total_pending: Money::zero(),
            total: Money::zero(),
        }
    }
}

/// Annual card view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualCardView {
    pub year: i32,
    /// Cards with at least one counted transaction, in card-list order
    pub cards: Vec<CardYear>,
    /// Column totals across all cards
    pub month_totals: [CardMonth; 12],
    pub total_general: Money,
    pub total_general_paid: Money,
    pub total_general_pending: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardBucket {
    Paid,
    Pending,
}

/// Status bucket, matched after trimming and case folding. Paid and billed
/// both count as paid.
fn bucket_for(txn: &Transaction) -> Option<CardBucket> {
    match txn.status_lenient()? {
        TransactionStatus::Paid | TransactionStatus::Billed => Some(CardBucket::Paid),
        TransactionStatus::Pending => Some(CardBucket::Pending),
    }
}

impl AnnualCardView {
    /// Generate the annual card view
    pub fn generate(transactions: &[Transaction], cards: &[Card], year: i32) -> Self {
        let mut card_years: Vec<CardYear> = cards.iter().map(|c| CardYear::new(&c.name)).collect();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, card) in cards.iter().enumerate() {
            index.entry(card.name.as_str()).or_insert(i);
        }

        let mut month_totals = [CardMonth::default(); 12];
        let mut total_general = Money::zero();
        let mut total_general_paid = Money::zero();
        let mut total_general_pending = Money::zero();
        let mut seen = vec![false; card_years.len()];

        for txn in transactions {
            let date = txn.date_for(DateBasis::Payment);
            if !in_year(date, year) {
                continue;
            }
            let Some(month) = date.map(|d| d.month0() as usize) else {
                continue;
            };
            let Some(&i) = index.get(txn.payment_method.as_str()) else {
                continue;
            };
            let Some(bucket) = bucket_for(txn) else {
                continue;
            };

            let card = &mut card_years[i];
            seen[i] = true;
            card.months[month].add(bucket, txn.amount);
            month_totals[month].add(bucket, txn.amount);

            match bucket {
                CardBucket::Paid => {
                    card.total_paid += txn.amount;
                    total_general_paid += txn.amount;
                }
                CardBucket::Pending => {
                    card.total_pending += txn.amount;
                    total_general_pending += txn.amount;
                }
            }
            card.total += txn.amount;
            total_general += txn.amount;
        }

        let cards = card_years
            .into_iter()
            .zip(seen)
            .filter_map(|(card, seen)| seen.then_some(card))
            .collect();

        Self {
            year,
            cards,
            month_totals,
            total_general,
            total_general_paid,
            total_general_pending,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let width = 20 + 13 * 13;
        let mut output = String::new();
        output.push_str(&format!("Cards: {}\n", self.year));
        output.push_str(&"=".repeat(width));
        output.push('\n');

        output.push_str(&format!("{:<20}", "Card"));
        for name in crate::display::MONTH_ABBREVIATIONS {
            output.push_str(&format!(" {:>12}", name));
        }
        output.push_str(&format!(" {:>12}\n", "Total"));
        output.push_str(&"-".repeat(width));
        output.push('\n');

        for card in &self.cards {
            output.push_str(&format!("{:<20}", crate::display::truncate(&card.card, 20)));
            for month in &card.months {
                output.push_str(&format!(" {:>12}", month.total.to_decimal_string()));
            }
            output.push_str(&format!(" {:>12}\n", card.total.to_decimal_string()));

            output.push_str(&format!("{:<20}", "  pending"));
            for month in &card.months {
                output.push_str(&format!(" {:>12}", month.pending.to_decimal_string()));
            }
            output.push_str(&format!(" {:>12}\n", card.total_pending.to_decimal_string()));
        }

        output.push_str(&"-".repeat(width));
        output.push('\n');
        output.push_str(&format!("{:<20}", "TOTAL"));
        for month in &self.month_totals {
            output.push_str(&format!(" {:>12}", month.total.to_decimal_string()));
        }
        output.push_str(&format!(" {:>12}\n", self.total_general.to_decimal_string()));
        output.push_str(&format!(
            "\nPaid: {}   Pending: {}   Total: {}\n",
            self.total_general_paid, self.total_general_pending, self.total_general
        ));

        output
    }

    /// Export the report to CSV format, one row per card and month
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SheetfinResult<()> {
        writeln!(writer, "Card,Month,Paid,Pending,Total")
            .map_err(|e| SheetfinError::Export(e.to_string()))?;

        for card in &self.cards {
            for (m, month) in card.months.iter().enumerate() {
                writeln!(
                    writer,
                    "{},{}-{:02},{},{},{}",
                    csv_field(&card.card),
                    self.year,
                    m + 1,
                    month.paid.to_decimal_string(),
                    month.pending.to_decimal_string(),
                    month.total.to_decimal_string()
                )
                .map_err(|e| SheetfinError::Export(e.to_string()))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn cards() -> Vec<Card> {
        vec![
            Card::new("Visa", 5, 15, Money::from_units(5000)),
            Card::new("Master", 10, 20, Money::from_units(3000)),
            Card::new("Elo", 1, 10, Money::from_units(1000)),
        ]
    }

    fn charge(card: &str, status: &str, cents: i64, y: i32, m: u32) -> Transaction {
        Transaction::new("1", TransactionKind::Expense, Money::from_cents(cents))
            .with_payment_method(card)
            .with_status(status)
            .with_payment_date(NaiveDate::from_ymd_opt(y, m, 15).unwrap())
    }

    #[test]
    fn test_paid_pending_partition() {
        let transactions = vec![
            charge("Visa", "Pago", 10000, 2024, 3),
            charge("Visa", " faturado ", 5000, 2024, 3),
            charge("Visa", "PENDENTE", 2500, 2024, 3),
            charge("Master", "Pendente", 7000, 2024, 11),
        ];
        let view = AnnualCardView::generate(&transactions, &cards(), 2024);

        let visa = &view.cards[0];
        assert_eq!(visa.card, "Visa");
        assert_eq!(visa.months[2].paid, Money::from_cents(15000));
        assert_eq!(visa.months[2].pending, Money::from_cents(2500));
        assert_eq!(visa.months[2].total, Money::from_cents(17500));
        assert_eq!(visa.total, visa.total_paid + visa.total_pending);

        for card in &view.cards {
            for month in &card.months {
                assert_eq!(month.paid + month.pending, month.total);
            }
        }
        assert_eq!(view.month_totals[2].total, Money::from_cents(17500));
        assert_eq!(view.month_totals[10].pending, Money::from_cents(7000));
        assert_eq!(view.total_general, Money::from_cents(24500));
        assert_eq!(view.total_general_paid, Money::from_cents(15000));
        assert_eq!(view.total_general_pending, Money::from_cents(9500));
    }

    #[test]
    fn test_excluded_statuses_never_count() {
        let transactions = vec![
            charge("Visa", "Cancelado", 10000, 2024, 1),
            charge("Visa", "", 10000, 2024, 1),
        ];
        let view = AnnualCardView::generate(&transactions, &cards(), 2024);
        assert!(view.cards.is_empty());
        assert!(view.total_general.is_zero());
        assert!(view.month_totals.iter().all(|m| m.total.is_zero()));
    }

    #[test]
    fn test_unknown_cards_other_years_and_undated_excluded() {
        let mut undated = charge("Visa", "Pago", 100, 2024, 1);
        undated.payment_date = None;
        let transactions = vec![
            charge("Amex", "Pago", 100, 2024, 1),
            charge("Visa", "Pago", 100, 2023, 12),
            undated,
        ];
        let view = AnnualCardView::generate(&transactions, &cards(), 2024);
        assert!(view.cards.is_empty());
        assert!(view.total_general.is_zero());
    }

    #[test]
    fn test_cards_without_activity_omitted_in_list_order() {
        let transactions = vec![
            charge("Elo", "Pago", 100, 2024, 6),
            charge("Visa", "Pago", 100, 2024, 6),
        ];
        let view = AnnualCardView::generate(&transactions, &cards(), 2024);
        let names: Vec<&str> = view.cards.iter().map(|c| c.card.as_str()).collect();
        assert_eq!(names, vec!["Visa", "Elo"]);
    }

    #[test]
    fn test_export_csv_has_twelve_rows_per_card() {
        let transactions = vec![charge("Visa", "Pago", 1234, 2024, 2)];
        let view = AnnualCardView::generate(&transactions, &cards(), 2024);

        let mut buffer = Vec::new();
        view.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv.lines().count(), 13);
        assert!(csv.contains("Visa,2024-02,12.34,0.00,12.34"));
    }
}
