//! Storage layer for sheetfin
//!
//! A keyed JSON store with atomic writes, and the `Storage` coordinator
//! that persists the whole dataset and records every replacement in the
//! audit log.

pub mod file_io;

pub use file_io::{read_json, write_json_atomic};

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::SheetfinPaths;
use crate::error::SheetfinResult;
use crate::models::{Card, CategoryLimit, Dataset, Transaction};

/// Store key for the transaction list
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Store key for the category-limit configuration
pub const CATEGORY_LIMITS_KEY: &str = "category_limits";
/// Store key for the card list
pub const CARDS_KEY: &str = "cards";

/// One JSON file per key inside a directory; last write wins
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load the value saved under `key`, `None` when nothing was saved
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> SheetfinResult<Option<T>> {
        read_json(self.path_for(key))
    }

    /// Save `value` under `key`, replacing what was there
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> SheetfinResult<()> {
        write_json_atomic(self.path_for(key), value)
    }
}

/// Main storage coordinator
pub struct Storage {
    paths: SheetfinPaths,
    store: JsonStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating its directories
    pub fn new(paths: SheetfinPaths) -> SheetfinResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            store: JsonStore::new(paths.data_dir()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &SheetfinPaths {
        &self.paths
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load the saved dataset; missing keys load as empty lists
    pub fn load_dataset(&self) -> SheetfinResult<Dataset> {
        let transactions: Vec<Transaction> =
            self.store.load(TRANSACTIONS_KEY)?.unwrap_or_default();
        let category_limits: Vec<CategoryLimit> =
            self.store.load(CATEGORY_LIMITS_KEY)?.unwrap_or_default();
        let cards: Vec<Card> = self.store.load(CARDS_KEY)?.unwrap_or_default();

        tracing::debug!(
            transactions = transactions.len(),
            category_limits = category_limits.len(),
            cards = cards.len(),
            "loaded dataset"
        );

        Ok(Dataset::new(transactions, category_limits, cards))
    }

    /// Replace the saved dataset with `dataset` and audit the replacement
    pub fn replace_dataset(&self, dataset: &Dataset, source: &str) -> SheetfinResult<()> {
        let previous = self.load_dataset()?;

        self.store.save(TRANSACTIONS_KEY, &dataset.transactions)?;
        self.store.save(CATEGORY_LIMITS_KEY, &dataset.category_limits)?;
        self.store.save(CARDS_KEY, &dataset.cards)?;

        let entry = AuditEntry::import(source, &previous, dataset);
        self.audit.log(&entry)?;

        tracing::info!(
            source,
            transactions = dataset.transactions.len(),
            "replaced dataset"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SheetfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn sample_dataset() -> Dataset {
        let txn = Transaction::new("7", TransactionKind::Expense, Money::from_cents(12345))
            .with_movement_date(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap())
            .with_category("Mercado");
        Dataset::new(
            vec![txn],
            vec![CategoryLimit::new("Mercado", "Essencial", Money::from_units(600))],
            vec![Card::new("Visa", 5, 15, Money::from_units(5000))],
        )
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(storage.load_dataset().unwrap().is_empty());
    }

    #[test]
    fn test_json_store_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStore::new(temp_dir.path());

        assert!(store.load::<Vec<String>>("missing").unwrap().is_none());
        store.save("names", &vec!["a".to_string()]).unwrap();
        assert_eq!(
            store.load::<Vec<String>>("names").unwrap(),
            Some(vec!["a".to_string()])
        );
        assert_eq!(store.path_for("names"), temp_dir.path().join("names.json"));
    }

    #[test]
    fn test_replace_and_load_dataset() {
        let (temp_dir, storage) = create_storage();
        let dataset = sample_dataset();

        storage.replace_dataset(&dataset, "/tmp/planilha").unwrap();

        let data_dir = temp_dir.path().join("data");
        assert!(data_dir.join("transactions.json").exists());
        assert!(data_dir.join("category_limits.json").exists());
        assert!(data_dir.join("cards.json").exists());

        let loaded = storage.load_dataset().unwrap();
        assert_eq!(loaded, dataset);
        assert_eq!(
            loaded.transactions[0].movement_date,
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
    }

    #[test]
    fn test_dates_stored_as_iso_strings() {
        let (temp_dir, storage) = create_storage();
        storage.replace_dataset(&sample_dataset(), "test").unwrap();

        let raw =
            std::fs::read_to_string(temp_dir.path().join("data").join("transactions.json")).unwrap();
        assert!(raw.contains("\"2024-03-02\""));
    }

    #[test]
    fn test_replace_is_audited() {
        let (_temp_dir, storage) = create_storage();
        storage.replace_dataset(&sample_dataset(), "first").unwrap();
        storage.replace_dataset(&Dataset::default(), "second").unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Import);
        assert_eq!(entries[1].operation, Operation::Replace);
        assert_eq!(entries[1].source, "second");
        assert_eq!(entries[1].transactions, 0);

        assert!(storage.load_dataset().unwrap().is_empty());
    }
}
