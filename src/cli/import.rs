//! CLI command handler for spreadsheet import
//!
//! Reads the sheet directory, replaces the stored dataset and prints what
//! was loaded.

use std::path::Path;

use crate::error::SheetfinResult;
use crate::import::import_dir;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, dir: &Path) -> SheetfinResult<()> {
    let dataset = import_dir(dir)?;
    storage.replace_dataset(&dataset, &dir.display().to_string())?;

    let undated = dataset
        .transactions
        .iter()
        .filter(|t| t.movement_date.is_none() && t.payment_date.is_none())
        .count();

    println!("Imported from {}", dir.display());
    println!("{}", crate::display::separator(40));
    println!("  Transactions:     {}", dataset.transactions.len());
    println!("  Category limits:  {}", dataset.category_limits.len());
    println!("  Cards:            {}", dataset.cards.len());
    if undated > 0 {
        println!();
        println!("{} transactions have no readable date and appear in no dated report.", undated);
    }

    Ok(())
}
