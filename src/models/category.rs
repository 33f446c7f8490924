//! Category labels
//!
//! Categories are plain labels. Every user starts with a fixed default set
//! and can add their own labels on top; names compare case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The built-in categories, in display order
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Housing",
    "Health",
    "Entertainment",
    "Income",
    "Other",
];

/// Name of the category reserved for income transactions
pub const INCOME_CATEGORY: &str = "Income";

/// Name of the catch-all category
pub const OTHER_CATEGORY: &str = "Other";

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A category label
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category, collapsing surrounding and repeated whitespace
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(normalize(name.as_ref()))
    }

    pub fn income() -> Self {
        Self(INCOME_CATEGORY.to_string())
    }

    pub fn other() -> Self {
        Self(OTHER_CATEGORY.to_string())
    }

    /// All default categories
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES.iter().map(|n| Category(n.to_string())).collect()
    }

    /// Default categories usable for expenses and budgets (everything but Income)
    pub fn expense_defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .filter(|n| **n != INCOME_CATEGORY)
            .map(|n| Category(n.to_string()))
            .collect()
    }

    /// Find the default category matching `name` (case-insensitive)
    pub fn find_default(name: &str) -> Option<Category> {
        let name = normalize(name);
        DEFAULT_CATEGORIES
            .iter()
            .find(|d| d.eq_ignore_ascii_case(&name))
            .map(|d| Category(d.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        DEFAULT_CATEGORIES
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&self.0))
    }

    pub fn is_income(&self) -> bool {
        self.0.eq_ignore_ascii_case(INCOME_CATEGORY)
    }

    /// Case-insensitive comparison against a raw name
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(&normalize(name))
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.0.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = self.0.chars().count();
        if len > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(Category::new("  Pet   Care ").name(), "Pet Care");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Category::defaults().len(), 8);
        assert_eq!(Category::expense_defaults().len(), 7);
        assert!(!Category::expense_defaults().contains(&Category::income()));
        assert!(Category::new("food").is_default());
        assert!(!Category::new("Pets").is_default());
    }

    #[test]
    fn test_find_default_is_case_insensitive() {
        assert_eq!(Category::find_default("HEALTH"), Some(Category::new("Health")));
        assert_eq!(Category::find_default("Gym"), None);
    }

    #[test]
    fn test_validation() {
        assert!(Category::new("Books").validate().is_ok());
        assert_eq!(
            Category::new("   ").validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert_eq!(
            Category::new("x".repeat(51)).validate(),
            Err(CategoryValidationError::NameTooLong(51))
        );
    }
}
