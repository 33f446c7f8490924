//! Monthly category budgets
//!
//! A budget is a spending ceiling for one expense category in one month.
//! At most one budget exists per category per month; `BudgetService` checks
//! this before inserting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{BudgetId, UserId};
use super::money::{Money, MAX_AMOUNT_CENTS};
use super::month::MonthKey;

/// A monthly spending ceiling for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub user_id: UserId,

    pub category: Category,

    /// Ceiling for the month (positive)
    pub amount: Money,

    pub month: MonthKey,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(user_id: UserId, category: Category, amount: Money, month: MonthKey) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            category,
            amount,
            month,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the ceiling; the category and month stay fixed
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Whether this budget covers `category` in `month`
    pub fn covers(&self, category: &Category, month: MonthKey) -> bool {
        self.month == month && self.category.matches(category.name())
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount.exceeds_max() {
            return Err(BudgetValidationError::AmountTooLarge(self.amount));
        }

        if self.category.validate().is_err() {
            return Err(BudgetValidationError::MissingCategory);
        }

        if self.category.is_income() {
            return Err(BudgetValidationError::IncomeCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.month, self.category, self.amount)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    MissingCategory,
    IncomeCategory,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Budget amount {} exceeds the maximum of {}",
                amount,
                Money::from_cents(MAX_AMOUNT_CENTS)
            ),
            Self::MissingCategory => write!(f, "Budget must have a category"),
            Self::IncomeCategory => write!(f, "Budgets cannot be set on the Income category"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
