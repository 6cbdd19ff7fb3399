//! Display formatting for the configuration sheets
//!
//! Lists of category limits and cards as imported.

use crate::models::{Card, CategoryLimit, Money};

use super::report::truncate;

/// Format the category limits grouped under their classification
pub fn format_limit_list(limits: &[CategoryLimit]) -> String {
    if limits.is_empty() {
        return "No category limits imported.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:24} {:20} {:>14}  {}\n",
        "Category", "Classification", "Monthly limit", "Examples"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for limit in limits {
        output.push_str(&format!(
            "{:24} {:20} {:>14}  {}\n",
            truncate(&limit.category, 24),
            truncate(&limit.classification, 20),
            limit.monthly_limit.to_string(),
            truncate(&limit.examples, 30)
        ));
    }

    let total: Money = limits.iter().map(|l| l.monthly_limit).sum();
    output.push_str(&"-".repeat(80));
    output.push('\n');
    output.push_str(&format!("{:45} {:>14}\n", "TOTAL", total.to_string()));

    output
}

/// Format the card list
pub fn format_card_list(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "No cards imported.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:20} {:>8} {:>8} {:>16}\n",
        "Card", "Closing", "Due", "Credit limit"
    ));
    output.push_str(&"-".repeat(55));
    output.push('\n');

    for card in cards {
        output.push_str(&format!(
            "{:20} {:>8} {:>8} {:>16}\n",
            truncate(&card.name, 20),
            card.closing_day,
            card.due_day,
            card.credit_limit.to_string()
        ));
    }

    output
}
