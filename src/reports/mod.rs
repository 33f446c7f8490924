//! Reports module for Spendwise
//!
//! Aggregation helpers over transaction lists, plus the dashboard and
//! analytics reports built on top of them.

pub mod aggregate;
pub mod analytics;
pub mod dashboard;

pub use aggregate::{
    budget_progress, category_sums, daily_trend, in_month, month_comparison, monthly_sums,
    sum_by_type, totals, week_of_month, weekly_series, BudgetProgress, CategorySum, ChangeType,
    DailyPoint, MonthComparison, MonthlySum, Totals, WeekBucket, DEFAULT_TREND_DAYS,
};
pub use analytics::AnalyticsReport;
pub use dashboard::DashboardReport;
