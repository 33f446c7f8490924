//! Storage layer for Spendwise
//!
//! A small JSON document store: one file per collection, atomic writes,
//! in-memory maps behind `RwLock`s. `Storage` opens the collections of a
//! single signed-in user together with the shared profile collection.

pub mod budget;
pub mod categories;
pub mod file_io;
pub mod profiles;
pub mod transactions;

pub use budget::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, remove_file_if_exists, write_json_atomic};
pub use profiles::{ProfileRepository, ProfileStore};
pub use transactions::TransactionRepository;

use std::sync::PoisonError;

use log::{info, warn};
use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SpendwisePaths;
use crate::error::SpendwiseError;
use crate::models::UserId;

pub(crate) fn read_lock_err<T>(e: PoisonError<T>) -> SpendwiseError {
    SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e))
}

pub(crate) fn write_lock_err<T>(e: PoisonError<T>) -> SpendwiseError {
    SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e))
}

/// Per-user storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendwisePaths,
    user_id: UserId,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub categories: CategoryRepository,
    pub profiles: ProfileRepository,
}

impl Storage {
    /// Create a Storage instance for `user_id` without loading anything
    pub fn new(paths: SpendwisePaths, user_id: UserId) -> Result<Self, SpendwiseError> {
        paths.ensure_directories()?;
        paths.ensure_user_dir(user_id)?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file(user_id)),
            budgets: BudgetRepository::new(paths.budgets_file(user_id)),
            categories: CategoryRepository::new(paths.categories_file(user_id)),
            profiles: ProfileRepository::new(paths.profiles_file()),
            user_id,
            paths,
        })
    }

    /// Create a Storage instance for `user_id` and load all collections
    pub fn open(paths: SpendwisePaths, user_id: UserId) -> Result<Self, SpendwiseError> {
        let mut storage = Self::new(paths, user_id)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &SpendwisePaths {
        &self.paths
    }

    /// The user whose data this storage holds
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn audit_logger(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&mut self) -> Result<(), SpendwiseError> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.categories.load()?;
        self.profiles.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), SpendwiseError> {
        self.transactions.save()?;
        self.budgets.save()?;
        self.categories.save()?;
        self.profiles.save()?;
        Ok(())
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        self.write_audit(&entry);
    }

    /// Record an update (with a field diff) in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff);
        self.write_audit(&entry);
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        self.write_audit(&entry);
    }

    // The mutation is already on disk at this point, so a failed audit write
    // is reported but does not fail the operation.
    fn write_audit(&self, entry: &AuditEntry) {
        if let Err(e) = self.audit.log(&entry.with_user(self.user_id)) {
            warn!("audit log write failed: {}", e);
        }
    }

    /// Remove every record belonging to this user, then their profile
    ///
    /// Returns the number of transactions, budgets and custom categories removed.
    pub fn delete_user_data(&self) -> Result<(usize, usize, usize), SpendwiseError> {
        let counts = (
            self.transactions.count()?,
            self.budgets.count()?,
            self.categories.count()?,
        );

        self.transactions.clear()?;
        self.budgets.clear()?;
        self.categories.clear()?;

        remove_file_if_exists(self.paths.transactions_file(self.user_id))?;
        remove_file_if_exists(self.paths.budgets_file(self.user_id))?;
        remove_file_if_exists(self.paths.categories_file(self.user_id))?;
        // Only succeeds once the directory is empty; leftovers are harmless.
        let _ = std::fs::remove_dir(self.paths.user_dir(self.user_id));

        if let Some(profile) = self.profiles.delete(self.user_id)? {
            self.profiles.save()?;
            self.log_delete(
                EntityType::Profile,
                self.user_id.to_string(),
                Some(profile.email.clone()),
                &profile,
            );
        }

        info!(
            "deleted data for {}: {} transactions, {} budgets, {} categories",
            self.user_id, counts.0, counts.1, counts.2
        );
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Category, Money, MonthKey, Transaction, TransactionType, UserProfile};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_storage(temp_dir: &TempDir, user_id: UserId) -> Storage {
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        Storage::open(paths, user_id).unwrap()
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let user = UserId::new();
        let storage = create_storage(&temp_dir, user);

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.paths().user_dir(user).exists());
        assert_eq!(storage.user_id(), user);
    }

    #[test]
    fn test_users_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let alice = UserId::new();
        let bob = UserId::new();

        let storage = create_storage(&temp_dir, alice);
        let txn = Transaction::new(
            alice,
            TransactionType::Expense,
            Money::from_cents(100),
            Category::new("Food"),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        storage.transactions.upsert(txn).unwrap();
        storage.save_all().unwrap();

        let other = create_storage(&temp_dir, bob);
        assert_eq!(other.transactions.count().unwrap(), 0);
        let again = create_storage(&temp_dir, alice);
        assert_eq!(again.transactions.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_user_data() {
        let temp_dir = TempDir::new().unwrap();
        let user = UserId::new();
        let storage = create_storage(&temp_dir, user);

        storage
            .profiles
            .create_profile(&UserProfile::new(user, "z@example.com", "Z"))
            .unwrap();
        storage
            .budgets
            .upsert(Budget::new(
                user,
                Category::new("Food"),
                Money::from_cents(5000),
                MonthKey::new(2025, 1).unwrap(),
            ))
            .unwrap();
        storage.categories.insert(Category::new("Pets")).unwrap();
        storage.save_all().unwrap();

        let counts = storage.delete_user_data().unwrap();
        assert_eq!(counts, (0, 1, 1));
        assert!(storage.profiles.get(user).unwrap().is_none());
        assert!(!storage.paths().budgets_file(user).exists());

        let entries = storage.audit_logger().read_all().unwrap();
        assert_eq!(entries.last().unwrap().entity_type, EntityType::Profile);
    }
}
