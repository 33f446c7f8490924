//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod assistant;
pub mod auth;
pub mod budget;
pub mod category;
pub mod export;
pub mod profile;
pub mod report;
pub mod transaction;

pub use assistant::{handle_ask_command, handle_recommend_command};
pub use auth::{handle_auth_command, AuthCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use profile::{handle_profile_command, ProfileCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Money, MonthKey, TransactionType};

/// Today's date in local time
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn parse_date(s: &str) -> SpendwiseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SpendwiseError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

pub(crate) fn parse_amount(s: &str) -> SpendwiseResult<Money> {
    Money::parse(s).map_err(|e| {
        SpendwiseError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50' or '100' ({})",
            s, e
        ))
    })
}

pub(crate) fn parse_kind(s: &str) -> SpendwiseResult<TransactionType> {
    s.parse().map_err(SpendwiseError::Validation)
}

/// Parse `YYYY-MM`, defaulting to the current month
pub(crate) fn parse_month(s: Option<&str>) -> SpendwiseResult<MonthKey> {
    match s {
        Some(s) => MonthKey::parse(s).map_err(|e| SpendwiseError::Validation(e.to_string())),
        None => Ok(MonthKey::from_date(today())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_date("2025-03-15").unwrap(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert!(parse_date("15/03/2025").unwrap_err().is_validation());
        assert_eq!(parse_amount("$1,234.50").unwrap(), Money::from_cents(123_450));
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert_eq!(parse_kind("Expense").unwrap(), TransactionType::Expense);
        assert!(parse_kind("transfer").is_err());
        assert_eq!(parse_month(Some("2025-02")).unwrap(), MonthKey::new(2025, 2).unwrap());
        assert!(parse_month(Some("2025-13")).is_err());
    }
}
