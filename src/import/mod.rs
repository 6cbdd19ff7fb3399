//! Spreadsheet import
//!
//! The finance spreadsheet is exchanged as one CSV file per sheet inside a
//! directory. Only the transaction sheet is mandatory; a missing limits or
//! cards sheet imports as an empty list.

pub mod sheets;
pub mod values;

use std::fs::File;
use std::path::Path;

use crate::error::{SheetfinError, SheetfinResult};
use crate::models::Dataset;

pub use sheets::{read_cards, read_category_limits, read_transactions};
pub use values::{excel_serial_to_date, parse_currency, parse_date};

/// File holding the transaction sheet
pub const TRANSACTIONS_SHEET: &str = "Movimentacoes.csv";
/// File holding the category-limit sheet
pub const LIMITS_SHEET: &str = "Despesas.csv";
/// File holding the card sheet
pub const CARDS_SHEET: &str = "Cartoes.csv";

/// Import the three sheets found in `dir`
pub fn import_dir(dir: &Path) -> SheetfinResult<Dataset> {
    if !dir.is_dir() {
        return Err(SheetfinError::Import(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let transactions_path = dir.join(TRANSACTIONS_SHEET);
    if !transactions_path.exists() {
        return Err(SheetfinError::Import(format!(
            "sheet {} not found in {}",
            TRANSACTIONS_SHEET,
            dir.display()
        )));
    }
    let transactions = read_transactions(open_sheet(&transactions_path)?)?;

    let limits_path = dir.join(LIMITS_SHEET);
    let category_limits = if limits_path.exists() {
        read_category_limits(open_sheet(&limits_path)?)?
    } else {
        tracing::warn!(sheet = LIMITS_SHEET, "sheet missing, importing no category limits");
        Vec::new()
    };

    let cards_path = dir.join(CARDS_SHEET);
    let cards = if cards_path.exists() {
        read_cards(open_sheet(&cards_path)?)?
    } else {
        tracing::warn!(sheet = CARDS_SHEET, "sheet missing, importing no cards");
        Vec::new()
    };

    let undated = transactions
        .iter()
        .filter(|t| t.movement_date.is_none() && t.payment_date.is_none())
        .count();
    if undated > 0 {
        tracing::warn!(undated, "transactions without any readable date");
    }

    tracing::info!(
        transactions = transactions.len(),
        category_limits = category_limits.len(),
        cards = cards.len(),
        "imported spreadsheet"
    );

    Ok(Dataset::new(transactions, category_limits, cards))
}

fn open_sheet(path: &Path) -> SheetfinResult<File> {
    File::open(path)
        .map_err(|e| SheetfinError::Import(format!("cannot open {}: {}", path.display(), e)))
}
