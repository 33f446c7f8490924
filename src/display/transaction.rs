//! Transaction display formatting
//!
//! Register tables and detail views for transactions.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Currency, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: Currency) -> Self {
        let signed = if txn.is_expense() { -txn.amount } else { txn.amount };
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.to_string(),
            amount: currency.format(signed),
            description: truncate(&txn.description, 30),
        }
    }
}

/// Format a list of transactions as a table
pub fn format_transaction_register(transactions: &[Transaction], currency: Currency) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow::new(t, currency))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());

    let income: crate::models::Money = transactions.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expenses: crate::models::Money = transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

    format!(
        "{}\n\n{} transaction(s)  Income: {}  Expenses: {}\n",
        table,
        transactions.len(),
        currency.format(income),
        currency.format(expenses)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: Currency) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", currency.format(txn.amount)));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    if let Some(url) = &txn.receipt_url {
        output.push_str(&format!("Receipt:     {}\n", url));
    }

    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M")
    ));
    if txn.updated_at != txn.created_at {
        output.push_str(&format!(
            "Updated:     {}\n",
            txn.updated_at.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}

/// Format a short transaction summary (one line)
pub fn format_transaction_short(txn: &Transaction, currency: Currency) -> String {
    let sign = if txn.is_expense() { "-" } else { "+" };
    let description = if txn.description.is_empty() {
        txn.category.name()
    } else {
        &txn.description
    };

    format!(
        "{} {} {}{} {}",
        txn.date.format("%Y-%m-%d"),
        truncate(description, 24),
        sign,
        currency.format(txn.amount),
        txn.category
    )
}

/// Truncate a string to at most `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionType, UserId};
    use chrono::NaiveDate;

    fn grocery_run() -> Transaction {
        Transaction::new(
            UserId::new(),
            TransactionType::Expense,
            Money::from_cents(5000),
            Category::new("Food"),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )
        .with_description("Test Store")
    }

    #[test]
    fn test_format_register() {
        let formatted = format_transaction_register(&[grocery_run()], Currency::Usd);
        assert!(formatted.contains("2025-01-15"));
        assert!(formatted.contains("Test Store"));
        assert!(formatted.contains("-$50.00"));
        assert!(formatted.contains("1 transaction(s)"));
    }

    #[test]
    fn test_format_empty_register() {
        let formatted = format_transaction_register(&[], Currency::Usd);
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_details() {
        let mut txn = grocery_run();
        txn.receipt_url = Some("https://example.com/r.png".into());

        let formatted = format_transaction_details(&txn, Currency::Eur);
        assert!(formatted.contains("Test Store"));
        assert!(formatted.contains("Food"));
        assert!(formatted.contains("€50.00"));
        assert!(formatted.contains("Receipt:     https://example.com/r.png"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short");
        let result = truncate("A very long string", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
        assert_eq!(truncate("Café crème brûlée", 8), "Café ...");
    }
}
