//! Service layer for Spendwise
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, category resolution and audit logging.

pub mod budget;
pub mod category;
pub mod profile;
pub mod transaction;

pub use budget::{BudgetService, CreateBudgetInput};
pub use category::CategoryService;
pub use profile::{DeletionSummary, ProfileService};
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
