//! Display formatting for terminal output
//!
//! Tables and detail views for transactions, budgets, categories and the
//! user profile. Report types format themselves.

pub mod budget;
pub mod category;
pub mod profile;
pub mod transaction;

pub use budget::{format_budget_details, format_budget_list, progress_bar};
pub use category::format_category_list;
pub use profile::format_profile;
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_short};
