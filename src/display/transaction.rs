//! Transaction display formatting
//!
//! Register-style rows for movement lists and card statements.

use crate::models::{Transaction, TransactionStatus};

use super::report::truncate;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction) -> String {
    let status_icon = match txn.status_lenient() {
        Some(TransactionStatus::Paid) => "✓",
        Some(TransactionStatus::Billed) => "≡",
        Some(TransactionStatus::Pending) => "…",
        None => " ",
    };

    let date = txn
        .movement_date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "--/--/----".to_string());

    let installment = if txn.installment_number.trim().is_empty() {
        String::new()
    } else {
        format!(" [{}]", txn.installment_number.trim())
    };

    format!(
        "{} {:10} {:18} {:28} {:>14}{}",
        status_icon,
        date,
        truncate(&txn.category, 18),
        truncate(&txn.description, 28),
        txn.amount.to_string(),
        installment
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:10} {:18} {:28} {:>14}\n",
        "", "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(75));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}
