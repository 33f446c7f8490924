//! Transaction model
//!
//! A transaction is a single income or expense record. Amounts are always
//! stored as positive values; the transaction type carries the direction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::{TransactionId, UserId};
use super::money::{Money, MAX_AMOUNT_CENTS};

/// Maximum length of a transaction description
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}' (expected income or expense)",
                other
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Owner of the record
    pub user_id: UserId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Positive amount
    pub amount: Money,

    pub category: Category,

    #[serde(default)]
    pub description: String,

    pub date: NaiveDate,

    /// Optional link to a receipt image or document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    ///
    /// Income transactions are always filed under the Income category.
    pub fn new(
        user_id: UserId,
        kind: TransactionType,
        amount: Money,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        let category = match kind {
            TransactionType::Income => Category::income(),
            TransactionType::Expense => category,
        };
        Self {
            id: TransactionId::new(),
            user_id,
            kind,
            amount,
            category,
            description: String::new(),
            date,
            receipt_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with sign applied (negative for expenses)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount.exceeds_max() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        if self.category.validate().is_err() {
            return Err(TransactionValidationError::MissingCategory);
        }

        match self.kind {
            TransactionType::Income if !self.category.is_income() => {
                return Err(TransactionValidationError::IncomeCategory(
                    self.category.clone(),
                ));
            }
            TransactionType::Expense if self.category.is_income() => {
                return Err(TransactionValidationError::ExpenseInIncomeCategory);
            }
            _ => {}
        }

        let len = self.description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(TransactionValidationError::DescriptionTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.signed_amount(),
            self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    MissingCategory,
    IncomeCategory(Category),
    ExpenseInIncomeCategory,
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount {} exceeds the maximum of {}",
                amount,
                Money::from_cents(MAX_AMOUNT_CENTS)
            ),
            Self::MissingCategory => write!(f, "Transaction must have a category"),
            Self::IncomeCategory(category) => write!(
                f,
                "Income transactions must use the Income category (got {})",
                category
            ),
            Self::ExpenseInIncomeCategory => {
                write!(f, "Expenses cannot use the Income category")
            }
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_income_forces_income_category() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionType::Income,
            Money::from_cents(100_000),
            Category::new("Food"),
            date(1),
        );
        assert_eq!(txn.category, Category::income());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_signed_amount() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionType::Expense,
            Money::from_cents(2500),
            Category::new("Food"),
            date(2),
        );
        assert_eq!(txn.signed_amount(), Money::from_cents(-2500));
    }

    #[test]
    fn test_validation_rules() {
        let mut txn = Transaction::new(
            UserId::new(),
            TransactionType::Expense,
            Money::zero(),
            Category::new("Food"),
            date(3),
        );
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));

        txn.amount = Money::from_cents(500);
        txn.category = Category::income();
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::ExpenseInIncomeCategory)
        );

        txn.category = Category::new("Food");
        txn.description = "x".repeat(201);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::DescriptionTooLong(201))
        );
    }

    #[test]
    fn test_amount_over_max_is_rejected() {
        let mut txn = Transaction::new(
            UserId::new(),
            TransactionType::Expense,
            Money::from_cents(MAX_AMOUNT_CENTS),
            Category::new("Housing"),
            date(5),
        );
        assert!(txn.validate().is_ok());

        txn.amount = Money::from_cents(5_000_000_000_000_000_000);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::AmountTooLarge(txn.amount))
        );
    }

    #[test]
    fn test_serializes_type_field() {
        let txn = Transaction::new(
            UserId::new(),
            TransactionType::Expense,
            Money::from_cents(999),
            Category::new("Transport"),
            date(4),
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["amount"], 999);
        assert!(json.get("receipt_url").is_none());
    }

    #[test]
    fn test_parse_type() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
