//! Budget repository for JSON storage
//!
//! Manages loading and saving one user's monthly budgets to budgets.json.
//! The one-budget-per-category-per-month rule is checked by `BudgetService`,
//! not here.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwiseError;
use crate::models::{Budget, BudgetId, Category, MonthKey};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock_err, write_lock_err};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

/// Month, then category name
fn sort_budgets(budgets: &mut [Budget]) {
    budgets.sort_by(|a, b| {
        a.month
            .cmp(&b.month)
            .then_with(|| a.category.name().cmp(b.category.name()))
    });
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self.budgets.write().map_err(write_lock_err)?;
        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendwiseError> {
        let budgets = self.budgets.read().map_err(read_lock_err)?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        sort_budgets(&mut list);

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, SpendwiseError> {
        let budgets = self.budgets.read().map_err(read_lock_err)?;
        Ok(budgets.get(&id).cloned())
    }

    pub fn get_all(&self) -> Result<Vec<Budget>, SpendwiseError> {
        let budgets = self.budgets.read().map_err(read_lock_err)?;
        let mut list: Vec<_> = budgets.values().cloned().collect();
        sort_budgets(&mut list);
        Ok(list)
    }

    /// All budgets for a month, sorted by category
    pub fn get_by_month(&self, month: MonthKey) -> Result<Vec<Budget>, SpendwiseError> {
        let budgets = self.budgets.read().map_err(read_lock_err)?;
        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.month == month)
            .cloned()
            .collect();
        sort_budgets(&mut list);
        Ok(list)
    }

    /// The budget for `category` in `month`, if one exists
    pub fn find(&self, category: &Category, month: MonthKey) -> Result<Option<Budget>, SpendwiseError> {
        let budgets = self.budgets.read().map_err(read_lock_err)?;
        Ok(budgets.values().find(|b| b.covers(category, month)).cloned())
    }

    /// Find a budget by full or short ID
    pub fn find_by_id(&self, identifier: &str) -> Result<Option<Budget>, SpendwiseError> {
        let budgets = self.budgets.read().map_err(read_lock_err)?;
        let mut matches = budgets.values().filter(|b| b.id.matches(identifier));
        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(SpendwiseError::Validation(format!(
                "Budget ID '{}' is ambiguous; use more characters",
                identifier
            )));
        }
        Ok(first)
    }

    pub fn upsert(&self, budget: Budget) -> Result<(), SpendwiseError> {
        let mut budgets = self.budgets.write().map_err(write_lock_err)?;
        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget, returning it if it existed
    pub fn delete(&self, id: BudgetId) -> Result<Option<Budget>, SpendwiseError> {
        let mut budgets = self.budgets.write().map_err(write_lock_err)?;
        Ok(budgets.remove(&id))
    }

    /// Drop every budget from memory (call `save` to persist)
    pub fn clear(&self) -> Result<(), SpendwiseError> {
        self.budgets.write().map_err(write_lock_err)?.clear();
        Ok(())
    }

    pub fn count(&self) -> Result<usize, SpendwiseError> {
        let budgets = self.budgets.read().map_err(read_lock_err)?;
        Ok(budgets.len())
    }

    /// Whether any budget (in any month) uses `category`
    pub fn category_in_use(&self, category: &Category) -> Result<bool, SpendwiseError> {
        let budgets = self.budgets.read().map_err(read_lock_err)?;
        Ok(budgets.values().any(|b| b.category.matches(category.name())))
    }
}
