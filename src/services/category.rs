//! Category service
//!
//! Combines the built-in categories with the user's own labels and guards
//! the rules around them: defaults cannot be shadowed or removed, and a label
//! still referenced by a transaction or budget stays.

use log::info;

use crate::audit::EntityType;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Category;
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Defaults first, then custom labels in the order they were added
    pub fn list(&self) -> SpendwiseResult<Vec<Category>> {
        let mut all = Category::defaults();
        all.extend(self.storage.categories.get_all()?);
        Ok(all)
    }

    /// Every category usable for expenses and budgets
    pub fn expense_categories(&self) -> SpendwiseResult<Vec<Category>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| !c.is_income())
            .collect())
    }

    /// Only the user's own labels
    pub fn list_custom(&self) -> SpendwiseResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Map a user-typed name to the stored category
    pub fn resolve(&self, name: &str) -> SpendwiseResult<Category> {
        if let Some(default) = Category::find_default(name) {
            return Ok(default);
        }
        self.storage
            .categories
            .get(name)?
            .ok_or_else(|| SpendwiseError::category_not_found(name.trim()))
    }

    /// Add a custom label
    pub fn add(&self, name: &str) -> SpendwiseResult<Category> {
        let category = Category::new(name);
        category
            .validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        if category.is_default() {
            return Err(SpendwiseError::Duplicate {
                entity_type: "Category",
                identifier: format!("{} (built-in)", category),
            });
        }

        if !self.storage.categories.insert(category.clone())? {
            return Err(SpendwiseError::Duplicate {
                entity_type: "Category",
                identifier: category.to_string(),
            });
        }
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.name(),
            Some(category.to_string()),
            &category,
        );
        info!("added category {}", category);

        Ok(category)
    }

    /// Remove a custom label that nothing refers to
    pub fn remove(&self, name: &str) -> SpendwiseResult<Category> {
        if let Some(default) = Category::find_default(name) {
            return Err(SpendwiseError::Validation(format!(
                "'{}' is a built-in category and cannot be removed",
                default
            )));
        }

        let category = self
            .storage
            .categories
            .get(name)?
            .ok_or_else(|| SpendwiseError::category_not_found(name.trim()))?;

        if self.storage.transactions.category_in_use(&category)? {
            return Err(SpendwiseError::Validation(format!(
                "Category '{}' is used by transactions. Recategorize them first.",
                category
            )));
        }
        if self.storage.budgets.category_in_use(&category)? {
            return Err(SpendwiseError::Validation(format!(
                "Category '{}' has budgets. Delete them first.",
                category
            )));
        }

        self.storage.categories.delete(category.name())?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.name(),
            Some(category.to_string()),
            &category,
        );
        info!("removed category {}", category);

        Ok(category)
    }
}
