//! JSON Export functionality
//!
//! Exports everything one user owns to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Budget, Category, Transaction, UserId, UserProfile};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export of one user's data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Owner of every record in the export
    pub user_id: UserId,

    pub profile: Option<UserProfile>,

    pub transactions: Vec<Transaction>,

    pub budgets: Vec<Budget>,

    /// Custom category labels (defaults are not exported)
    pub categories: Vec<Category>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_count: usize,
    pub category_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot the storage's user
    pub fn from_storage(storage: &Storage) -> SpendwiseResult<Self> {
        let user_id = storage.user_id();
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;
        let categories = storage.categories.get_all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            category_count: categories.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id,
            profile: storage.profiles.get(user_id)?,
            transactions,
            budgets,
            categories,
            metadata,
        })
    }

    /// Check the schema version and that every record belongs to `user_id`
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if let Some(profile) = &self.profile {
            if profile.id != self.user_id {
                return Err(format!(
                    "Profile {} does not belong to user {}",
                    profile.id, self.user_id
                ));
            }
        }

        for txn in &self.transactions {
            if txn.user_id != self.user_id {
                return Err(format!(
                    "Transaction {} belongs to another user ({})",
                    txn.id, txn.user_id
                ));
            }
            if !txn.category.is_default() && !self.categories.iter().any(|c| c.matches(txn.category.name())) {
                return Err(format!(
                    "Transaction {} references unknown category {}",
                    txn.id, txn.category
                ));
            }
        }

        for budget in &self.budgets {
            if budget.user_id != self.user_id {
                return Err(format!(
                    "Budget {} belongs to another user ({})",
                    budget.id, budget.user_id
                ));
            }
        }

        Ok(())
    }
}

/// Export the user's data to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> SpendwiseResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SpendwiseError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn read_full_json(json_str: &str) -> SpendwiseResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| SpendwiseError::Export(e.to_string()))?;
    export.validate().map_err(SpendwiseError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendwisePaths;
    use crate::models::{Money, MonthKey, TransactionType};
    use crate::storage::ProfileStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, UserId::new()).unwrap();
        (temp_dir, storage)
    }

    fn populate(storage: &Storage) {
        let user = storage.user_id();
        storage
            .profiles
            .create_profile(&UserProfile::new(user, "r@example.com", "R"))
            .unwrap();
        storage.categories.insert(Category::new("Pets")).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(
                user,
                TransactionType::Expense,
                Money::from_cents(5000),
                Category::new("Pets"),
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            ))
            .unwrap();
        storage
            .budgets
            .upsert(Budget::new(
                user,
                Category::new("Food"),
                Money::from_cents(30_000),
                MonthKey::new(2025, 1).unwrap(),
            ))
            .unwrap();
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.transaction_count, 1);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-15"));
        assert!(export.profile.is_some());
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_export_reads_back() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let mut buf = Vec::new();
        export_full_json(&storage, &mut buf, true).unwrap();
        let export = read_full_json(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(export.budgets.len(), 1);
        assert_eq!(export.categories, vec![Category::new("Pets")]);
    }

    #[test]
    fn test_validate_rejects_foreign_records() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let mut export = FullExport::from_storage(&storage).unwrap();
        export.transactions[0].user_id = UserId::new();
        assert!(export.validate().unwrap_err().contains("another user"));

        let mut export = FullExport::from_storage(&storage).unwrap();
        export.categories.clear();
        assert!(export.validate().unwrap_err().contains("unknown category"));

        let mut export = FullExport::from_storage(&storage).unwrap();
        export.schema_version = "0.9.0".into();
        assert!(export.validate().is_err());
    }
}
