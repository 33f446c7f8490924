//! Transaction service
//!
//! Provides business logic for transaction management: CRUD operations,
//! category resolution and filtering.

use chrono::NaiveDate;
use log::info;

use crate::audit::EntityType;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Category, Money, Transaction, TransactionId, TransactionType};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by income or expense
    pub kind: Option<TransactionType>,
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive text match on description or category
    pub search: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by date range (inclusive)
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    pub amount: Money,
    /// Ignored for income, which is always filed under Income
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub receipt_url: Option<String>,
}

/// Changes to apply to an existing transaction; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub kind: Option<TransactionType>,
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the receipt link
    pub receipt_url: Option<Option<String>>,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn resolve_category(
        &self,
        kind: TransactionType,
        name: Option<&str>,
    ) -> SpendwiseResult<Category> {
        match kind {
            TransactionType::Income => Ok(Category::income()),
            TransactionType::Expense => {
                let name = name.map(str::trim).filter(|n| !n.is_empty()).ok_or_else(|| {
                    SpendwiseError::Validation("Expense transactions need a category".into())
                })?;
                CategoryService::new(self.storage).resolve(name)
            }
        }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> SpendwiseResult<Transaction> {
        let category = self.resolve_category(input.kind, input.category.as_deref())?;

        let mut txn = Transaction::new(
            self.storage.user_id(),
            input.kind,
            input.amount,
            category,
            input.date,
        );
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        txn.receipt_url = input
            .receipt_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        txn.validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(audit_name(&txn)),
            &txn,
        );
        info!("created {} transaction {}", txn.kind, txn.id);

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> SpendwiseResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full or short ID string
    pub fn find(&self, identifier: &str) -> SpendwiseResult<Option<Transaction>> {
        self.storage.transactions.find(identifier)
    }

    /// Like `find`, but a missing transaction is an error
    pub fn require(&self, identifier: &str) -> SpendwiseResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| SpendwiseError::transaction_not_found(identifier))
    }

    /// List transactions, newest first, with optional filtering
    pub fn list(&self, filter: TransactionFilter) -> SpendwiseResult<Vec<Transaction>> {
        let mut transactions = if let Some(category) = &filter.category {
            self.storage.transactions.get_by_category(category)?
        } else if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            self.storage.transactions.get_by_date_range(start, end)?
        } else {
            self.storage.transactions.get_all()?
        };

        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }
        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }
        if let Some(search) = filter.search.as_deref().map(str::to_lowercase) {
            if !search.is_empty() {
                transactions.retain(|t| {
                    t.description.to_lowercase().contains(&search)
                        || t.category.name().to_lowercase().contains(&search)
                });
            }
        }

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Update a transaction
    pub fn update(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> SpendwiseResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| SpendwiseError::transaction_not_found(id.to_string()))?;
        let before = txn.clone();

        if let Some(kind) = input.kind {
            txn.kind = kind;
        }
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(receipt_url) = input.receipt_url {
            txn.receipt_url = receipt_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty());
        }

        match (txn.kind, input.category) {
            (TransactionType::Income, _) => txn.category = Category::income(),
            (TransactionType::Expense, Some(name)) => {
                txn.category = self.resolve_category(TransactionType::Expense, Some(&name))?;
            }
            // Switching to expense without naming a category leaves Income in
            // place, which validation rejects below.
            (TransactionType::Expense, None) => {}
        }

        txn.validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;
        txn.touch();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(audit_name(&txn)),
            &before,
            &txn,
        );
        info!("updated transaction {}", txn.id);

        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> SpendwiseResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .delete(id)?
            .ok_or_else(|| SpendwiseError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(audit_name(&txn)),
            &txn,
        );
        info!("deleted transaction {}", txn.id);

        Ok(txn)
    }

    pub fn count(&self) -> SpendwiseResult<usize> {
        self.storage.transactions.count()
    }
}

fn audit_name(txn: &Transaction) -> String {
    format!("{} {} {}", txn.date, txn.category, txn.amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendwisePaths;
    use crate::models::UserId;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, UserId::new()).unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn expense(category: &str, cents: i64, d: u32) -> CreateTransactionInput {
        CreateTransactionInput {
            kind: TransactionType::Expense,
            amount: Money::from_cents(cents),
            category: Some(category.into()),
            description: None,
            date: date(d),
            receipt_url: None,
        }
    }

    #[test]
    fn test_create_expense() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(CreateTransactionInput {
                description: Some("  Groceries  ".into()),
                ..expense("food", 4250, 3)
            })
            .unwrap();

        assert_eq!(txn.category.name(), "Food");
        assert_eq!(txn.description, "Groceries");
        assert_eq!(txn.user_id, storage.user_id());
        assert_eq!(service.count().unwrap(), 1);

        let entries = storage.audit_logger().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, Some(storage.user_id()));
    }

    #[test]
    fn test_income_forces_income_category() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(CreateTransactionInput {
                kind: TransactionType::Income,
                ..expense("Food", 300_000, 1)
            })
            .unwrap();
        assert!(txn.category.is_income());
    }

    #[test]
    fn test_create_validation() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        assert!(service.create(expense("Food", 0, 1)).unwrap_err().is_validation());
        assert!(service.create(expense("Income", 100, 1)).unwrap_err().is_validation());
        assert!(service.create(expense("Boats", 100, 1)).unwrap_err().is_not_found());
        assert!(service
            .create(CreateTransactionInput {
                category: None,
                ..expense("Food", 100, 1)
            })
            .unwrap_err()
            .is_validation());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service
            .create(CreateTransactionInput {
                description: Some("Bus pass".into()),
                ..expense("Transport", 6000, 2)
            })
            .unwrap();
        service.create(expense("Food", 1200, 10)).unwrap();
        service.create(expense("Food", 800, 20)).unwrap();
        service
            .create(CreateTransactionInput {
                kind: TransactionType::Income,
                ..expense("Income", 500_000, 1)
            })
            .unwrap();

        let food = service
            .list(TransactionFilter::new().category(Category::new("Food")))
            .unwrap();
        assert_eq!(food.len(), 2);
        assert_eq!(food[0].date, date(20));

        let mid = service
            .list(TransactionFilter::new().date_range(date(5), date(25)))
            .unwrap();
        assert_eq!(mid.len(), 2);

        let income = service
            .list(TransactionFilter::new().kind(TransactionType::Income))
            .unwrap();
        assert_eq!(income.len(), 1);

        let bus = service.list(TransactionFilter::new().search("BUS")).unwrap();
        assert_eq!(bus.len(), 1);

        let limited = service.list(TransactionFilter::new().limit(3)).unwrap();
        assert_eq!(limited.len(), 3);
    }

    #[test]
    fn test_update() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.create(expense("Food", 1000, 5)).unwrap();

        let updated = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    amount: Some(Money::from_cents(1500)),
                    category: Some("shopping".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, Money::from_cents(1500));
        assert_eq!(updated.category.name(), "Shopping");

        let as_income = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionType::Income),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(as_income.category.is_income());

        // Back to expense without a category is rejected
        let err = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionType::Expense),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        let entries = storage.audit_logger().read_all().unwrap();
        assert!(entries[1].diff_summary.as_deref().unwrap_or("").contains("amount"));
    }

    #[test]
    fn test_delete_and_find() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.create(expense("Food", 1000, 5)).unwrap();

        let short = txn.id.to_string();
        assert_eq!(service.require(&short).unwrap().id, txn.id);

        service.delete(txn.id).unwrap();
        assert!(service.find(&short).unwrap().is_none());
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }
}
