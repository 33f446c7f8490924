//! Dashboard Report
//!
//! One-screen summary of a month: totals, the weekly income/expense series,
//! the most recent transactions and how each budget is tracking.

use crate::error::SpendwiseResult;
use crate::models::{Currency, MonthKey, Transaction};
use crate::storage::Storage;

use super::aggregate::{budget_progress, in_month, totals, weekly_series, BudgetProgress, Totals, WeekBucket};

/// Dashboard for a single month
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub month: MonthKey,
    /// Display currency from the user's preferences
    pub currency: Currency,
    pub totals: Totals,
    pub weekly: Vec<WeekBucket>,
    /// Newest transactions across all months
    pub recent: Vec<Transaction>,
    pub budgets: Vec<BudgetProgress>,
    /// Number of transactions in the month
    pub transaction_count: usize,
}

/// Currency preference of the storage's user, or the default
pub(crate) fn user_currency(storage: &Storage) -> SpendwiseResult<Currency> {
    Ok(storage
        .profiles
        .get(storage.user_id())?
        .map(|p| p.currency())
        .unwrap_or_default())
}

impl DashboardReport {
    /// Generate the dashboard for `month`, listing up to `recent` transactions
    pub fn generate(storage: &Storage, month: MonthKey, recent: usize) -> SpendwiseResult<Self> {
        let all = storage.transactions.get_all()?;
        let month_txns = in_month(&all, month);
        let budgets = storage.budgets.get_by_month(month)?;

        Ok(Self {
            month,
            currency: user_currency(storage)?,
            totals: totals(&month_txns),
            weekly: weekly_series(&month_txns, month),
            recent: all.iter().take(recent).cloned().collect(),
            budgets: budget_progress(&budgets, &month_txns),
            transaction_count: month_txns.len(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let c = self.currency;
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {}\n", self.month.friendly()));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>16}\n", "Total Income", c.format(self.totals.income)));
        output.push_str(&format!("{:<20} {:>16}\n", "Total Expenses", c.format(self.totals.expenses)));
        output.push_str(&format!("{:<20} {:>16}\n", "Balance", c.format(self.totals.balance)));
        output.push_str(&format!("{:<20} {:>16}\n\n", "Transactions", self.transaction_count));

        output.push_str("Income vs Expenses\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for week in &self.weekly {
            output.push_str(&format!(
                "{:<10} {:>16} {:>16}\n",
                week.label(),
                c.format(week.income),
                c.format(week.expenses)
            ));
        }

        output.push_str("\nBudgets\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.budgets.is_empty() {
            output.push_str("No budgets set for this month.\n");
        }
        for progress in &self.budgets {
            output.push_str(&format!(
                "{:<20} {:>12} of {:>12} {:>6.0}%{}\n",
                progress.budget.category.name(),
                c.format(progress.spent),
                c.format(progress.budget.amount),
                progress.percent,
                if progress.over_budget { "  OVER" } else { "" }
            ));
        }

        output.push_str("\nRecent Transactions\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.recent.is_empty() {
            output.push_str("No transactions yet.\n");
        }
        for txn in &self.recent {
            output.push_str(&format!(
                "{} {:<24} {:>14}\n",
                txn.date,
                truncate(if txn.description.is_empty() { txn.category.name() } else { &txn.description }, 24),
                c.format(txn.signed_amount())
            ));
        }

        output
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}
