//! Core data models for Spendwise
//!
//! Transactions, monthly budgets, category labels and user profiles, plus
//! the value types they are built from.

pub mod budget;
pub mod category;
pub mod currency;
pub mod ids;
pub mod money;
pub mod month;
pub mod profile;
pub mod transaction;

pub use budget::Budget;
pub use category::{Category, DEFAULT_CATEGORIES, INCOME_CATEGORY, OTHER_CATEGORY};
pub use currency::{Currency, Theme};
pub use ids::{BudgetId, TransactionId, UserId};
pub use money::Money;
pub use month::MonthKey;
pub use profile::{Preferences, UserProfile};
pub use transaction::{Transaction, TransactionType};
