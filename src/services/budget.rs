//! Budget service
//!
//! Monthly per-category spending limits. At most one budget exists for a
//! category in a given month; `set` enforces that.

use log::info;

use crate::audit::EntityType;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Budget, BudgetId, Category, Money, MonthKey};
use crate::reports::{budget_progress, in_month, BudgetProgress};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Input for creating a budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub category: String,
    pub amount: Money,
    pub month: MonthKey,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create the budget for a category and month
    pub fn set(&self, input: CreateBudgetInput) -> SpendwiseResult<Budget> {
        let category = CategoryService::new(self.storage).resolve(&input.category)?;

        if self.storage.budgets.find(&category, input.month)?.is_some() {
            return Err(SpendwiseError::duplicate_budget(category.name(), input.month));
        }

        let budget = Budget::new(self.storage.user_id(), category, input.amount, input.month);
        budget
            .validate()
            .map_err(|e| SpendwiseError::Budget(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(audit_name(&budget)),
            &budget,
        );
        info!("set budget {} for {} {}", budget.id, budget.category, budget.month);

        Ok(budget)
    }

    pub fn get(&self, id: BudgetId) -> SpendwiseResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by full or short ID
    pub fn find(&self, identifier: &str) -> SpendwiseResult<Option<Budget>> {
        self.storage.budgets.find_by_id(identifier)
    }

    /// The budget for a category name in a month
    pub fn find_for(&self, category: &str, month: MonthKey) -> SpendwiseResult<Option<Budget>> {
        let category = Category::new(category);
        self.storage.budgets.find(&category, month)
    }

    /// Change a budget's amount; category and month stay fixed
    pub fn update_amount(&self, id: BudgetId, amount: Money) -> SpendwiseResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| SpendwiseError::budget_not_found(id.to_string()))?;
        let before = budget.clone();

        budget.set_amount(amount);
        budget
            .validate()
            .map_err(|e| SpendwiseError::Budget(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            Some(audit_name(&budget)),
            &before,
            &budget,
        );
        info!("updated budget {}", budget.id);

        Ok(budget)
    }

    pub fn delete(&self, id: BudgetId) -> SpendwiseResult<Budget> {
        let budget = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| SpendwiseError::budget_not_found(id.to_string()))?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::Budget,
            budget.id.to_string(),
            Some(audit_name(&budget)),
            &budget,
        );
        info!("deleted budget {}", budget.id);

        Ok(budget)
    }

    /// Budgets of a month, sorted by category
    pub fn list_for_month(&self, month: MonthKey) -> SpendwiseResult<Vec<Budget>> {
        self.storage.budgets.get_by_month(month)
    }

    /// Expense categories that have no budget in `month` yet
    pub fn available_categories(&self, month: MonthKey) -> SpendwiseResult<Vec<Category>> {
        let budgets = self.list_for_month(month)?;
        Ok(CategoryService::new(self.storage)
            .expense_categories()?
            .into_iter()
            .filter(|c| !budgets.iter().any(|b| b.category.matches(c.name())))
            .collect())
    }

    /// Spending against each budget of `month`
    pub fn progress_for_month(&self, month: MonthKey) -> SpendwiseResult<Vec<BudgetProgress>> {
        let budgets = self.list_for_month(month)?;
        let transactions = in_month(&self.storage.transactions.get_all()?, month);
        Ok(budget_progress(&budgets, &transactions))
    }
}

fn audit_name(budget: &Budget) -> String {
    format!("{} {}", budget.month, budget.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendwisePaths;
    use crate::models::{Transaction, TransactionType, UserId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, UserId::new()).unwrap();
        (temp_dir, storage)
    }

    fn march() -> MonthKey {
        MonthKey::new(2025, 3).unwrap()
    }

    fn input(category: &str, cents: i64) -> CreateBudgetInput {
        CreateBudgetInput {
            category: category.into(),
            amount: Money::from_cents(cents),
            month: march(),
        }
    }

    #[test]
    fn test_set_budget() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.set(input("food", 40_000)).unwrap();
        assert_eq!(budget.category.name(), "Food");
        assert_eq!(budget.user_id, storage.user_id());
        assert!(service.find_for("FOOD", march()).unwrap().is_some());
    }

    #[test]
    fn test_duplicate_budget_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set(input("Food", 40_000)).unwrap();

        let err = service.set(input("FOOD", 10_000)).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(err.to_string(), "Budget already exists: Food for 2025-03");

        // Another month is fine
        service
            .set(CreateBudgetInput {
                month: march().next(),
                ..input("Food", 10_000)
            })
            .unwrap();
    }

    #[test]
    fn test_invalid_budgets() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(matches!(service.set(input("Food", 0)), Err(SpendwiseError::Budget(_))));
        assert!(matches!(service.set(input("Income", 100)), Err(SpendwiseError::Budget(_))));
        assert!(service.set(input("Boats", 100)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let budget = service.set(input("Food", 40_000)).unwrap();

        let updated = service.update_amount(budget.id, Money::from_cents(45_000)).unwrap();
        assert_eq!(updated.amount, Money::from_cents(45_000));
        assert_eq!(updated.category, budget.category);
        assert!(service.update_amount(budget.id, Money::from_cents(-1)).is_err());

        service.delete(budget.id).unwrap();
        assert!(service.get(budget.id).unwrap().is_none());
        assert!(service.delete(budget.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_available_categories() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set(input("Food", 40_000)).unwrap();

        let available = service.available_categories(march()).unwrap();
        assert!(!available.iter().any(|c| c.name() == "Food"));
        assert!(!available.iter().any(|c| c.is_income()));
        assert!(available.iter().any(|c| c.name() == "Transport"));
        assert_eq!(service.available_categories(march().next()).unwrap().len(), 7);
    }

    #[test]
    fn test_progress_for_month() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set(input("Food", 10_000)).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(
                storage.user_id(),
                TransactionType::Expense,
                Money::from_cents(2_500),
                Category::new("Food"),
                NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            ))
            .unwrap();

        let progress = service.progress_for_month(march()).unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].spent, Money::from_cents(2_500));
        assert_eq!(progress[0].remaining, Money::from_cents(7_500));
        assert_eq!(progress[0].percent, 25.0);
    }
}
