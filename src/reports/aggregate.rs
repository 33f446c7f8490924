//! Aggregation helpers
//!
//! Pure functions that fold a flat transaction list into totals, category
//! breakdowns and time-bucketed series. Amounts on transactions are always
//! positive; the transaction type decides which side they land on.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::models::{Budget, Category, Money, MonthKey, Transaction, TransactionType};

/// Days covered by the spending trend when no range is given
pub const DEFAULT_TREND_DAYS: usize = 30;

/// Number of buckets in the weekly series
pub const WEEKS_PER_MONTH: u32 = 4;

/// Income, expenses and their difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
}

/// Spending (or income) of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySum {
    pub category: Category,
    pub amount: Money,
    /// Share of the total across all categories, 0-100
    pub percent: f64,
}

/// Income and expenses of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySum {
    pub month: MonthKey,
    pub income: Money,
    pub expenses: Money,
}

impl MonthlySum {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// One bucket of the weekly income/expense series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    /// 1-based week of the month
    pub week: u32,
    pub income: Money,
    pub expenses: Money,
}

impl WeekBucket {
    /// Chart label ("Week 1")
    pub fn label(&self) -> String {
        format!("Week {}", self.week)
    }
}

/// Expenses on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub expenses: Money,
}

/// Direction of a month-over-month change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    Same,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increase => write!(f, "increase"),
            Self::Decrease => write!(f, "decrease"),
            Self::Same => write!(f, "same"),
        }
    }
}

/// Expenses of a month compared with the month before
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComparison {
    pub current_month: MonthKey,
    pub current: Money,
    pub previous: Money,
    /// Percentage change from the previous month
    pub change_pct: f64,
    pub change_type: ChangeType,
}

/// How much of a budget has been spent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget: Budget,
    pub spent: Money,
    /// Budget amount minus spent; negative when over budget
    pub remaining: Money,
    /// Spent as a percentage of the budget, uncapped
    pub percent: f64,
    pub over_budget: bool,
}

impl BudgetProgress {
    /// Compute progress of `budget` from the user's transactions
    pub fn compute(budget: &Budget, transactions: &[Transaction]) -> Self {
        let spent: Money = transactions
            .iter()
            .filter(|t| {
                t.is_expense()
                    && budget.month.contains(t.date)
                    && t.category.matches(budget.category.name())
            })
            .map(|t| t.amount)
            .sum();
        let remaining = budget.amount - spent;

        Self {
            budget: budget.clone(),
            spent,
            remaining,
            percent: spent.percent_of(budget.amount),
            over_budget: remaining.is_negative(),
        }
    }

    /// Percentage for progress bars, capped at 100
    pub fn display_percent(&self) -> f64 {
        self.percent.clamp(0.0, 100.0)
    }
}

/// Progress for each budget, in the order given
pub fn budget_progress(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetProgress> {
    budgets
        .iter()
        .map(|b| BudgetProgress::compute(b, transactions))
        .collect()
}

/// Sum of all amounts of one type
pub fn sum_by_type(transactions: &[Transaction], kind: TransactionType) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let income = sum_by_type(transactions, TransactionType::Income);
    let expenses = sum_by_type(transactions, TransactionType::Expense);
    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Transactions dated inside `month`
pub fn in_month(transactions: &[Transaction], month: MonthKey) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .cloned()
        .collect()
}

/// Per-category sums of one type, largest first
///
/// Ties are broken by category name so the order is stable.
pub fn category_sums(transactions: &[Transaction], kind: TransactionType) -> Vec<CategorySum> {
    let mut sums: HashMap<String, (Category, Money)> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.kind == kind) {
        let entry = sums
            .entry(txn.category.name().to_lowercase())
            .or_insert_with(|| (txn.category.clone(), Money::zero()));
        entry.1 += txn.amount;
    }

    let total: Money = sums.values().map(|(_, amount)| *amount).sum();
    let mut result: Vec<_> = sums
        .into_values()
        .map(|(category, amount)| CategorySum {
            percent: amount.percent_of(total),
            category,
            amount,
        })
        .collect();
    result.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.name().cmp(b.category.name()))
    });

    debug!("category_sums: {} categories from {} transactions", result.len(), transactions.len());
    result
}

/// Income and expenses for the `months` months ending at `end`, oldest first
pub fn monthly_sums(transactions: &[Transaction], end: MonthKey, months: usize) -> Vec<MonthlySum> {
    end.trailing(months)
        .into_iter()
        .map(|month| {
            let in_month = in_month(transactions, month);
            MonthlySum {
                month,
                income: sum_by_type(&in_month, TransactionType::Income),
                expenses: sum_by_type(&in_month, TransactionType::Expense),
            }
        })
        .collect()
}

/// Week of the month a day falls in; days 22 and later all land in week 4
pub fn week_of_month(day: u32) -> u32 {
    (day.saturating_sub(1) / 7 + 1).min(WEEKS_PER_MONTH)
}

/// Income and expenses of `month` split into four weekly buckets
pub fn weekly_series(transactions: &[Transaction], month: MonthKey) -> Vec<WeekBucket> {
    let mut buckets: Vec<WeekBucket> = (1..=WEEKS_PER_MONTH)
        .map(|week| WeekBucket {
            week,
            income: Money::zero(),
            expenses: Money::zero(),
        })
        .collect();

    for txn in transactions.iter().filter(|t| month.contains(t.date)) {
        let bucket = &mut buckets[(week_of_month(txn.date.day()) - 1) as usize];
        match txn.kind {
            TransactionType::Income => bucket.income += txn.amount,
            TransactionType::Expense => bucket.expenses += txn.amount,
        }
    }

    buckets
}

/// Expenses per day for the `days` days ending at `today`, oldest first
///
/// Days without spending are present with a zero amount.
pub fn daily_trend(transactions: &[Transaction], today: NaiveDate, days: usize) -> Vec<DailyPoint> {
    if days == 0 {
        return Vec::new();
    }
    let start = today - Duration::days(days as i64 - 1);

    let mut per_day: HashMap<NaiveDate, Money> = HashMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && t.date >= start && t.date <= today)
    {
        *per_day.entry(txn.date).or_default() += txn.amount;
    }

    start
        .iter_days()
        .take(days)
        .map(|date| DailyPoint {
            date,
            expenses: per_day.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}

/// Compare expenses in `current` with the month before it
pub fn month_comparison(transactions: &[Transaction], current: MonthKey) -> MonthComparison {
    let this_month = sum_by_type(&in_month(transactions, current), TransactionType::Expense);
    let last_month = sum_by_type(&in_month(transactions, current.prev()), TransactionType::Expense);

    let change_pct = if last_month.is_positive() {
        (this_month - last_month).percent_of(last_month)
    } else if this_month.is_positive() {
        100.0
    } else {
        0.0
    };

    let change_type = if change_pct > 0.0 {
        ChangeType::Increase
    } else if change_pct < 0.0 {
        ChangeType::Decrease
    } else {
        ChangeType::Same
    };

    MonthComparison {
        current_month: current,
        current: this_month,
        previous: last_month,
        change_pct,
        change_type,
    }
}
