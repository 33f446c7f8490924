//! Analytics Report
//!
//! Daily spending trend, this month against last month, and where the money
//! went this month.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Currency, MonthKey, TransactionType};
use crate::storage::Storage;

use super::aggregate::{
    category_sums, daily_trend, in_month, month_comparison, CategorySum, ChangeType, DailyPoint,
    MonthComparison, DEFAULT_TREND_DAYS,
};
use super::dashboard::user_currency;

/// Spending analytics as of a given day
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub today: NaiveDate,
    pub currency: Currency,
    /// Expenses per day, oldest first
    pub trend: Vec<DailyPoint>,
    pub comparison: MonthComparison,
    /// Expenses of the current month by category, largest first
    pub categories: Vec<CategorySum>,
}

impl AnalyticsReport {
    /// Generate analytics for the month containing `today`
    pub fn generate(storage: &Storage, today: NaiveDate) -> SpendwiseResult<Self> {
        let all = storage.transactions.get_all()?;
        let month = MonthKey::from_date(today);

        Ok(Self {
            today,
            currency: user_currency(storage)?,
            trend: daily_trend(&all, today, DEFAULT_TREND_DAYS),
            comparison: month_comparison(&all, month),
            categories: category_sums(&in_month(&all, month), TransactionType::Expense),
        })
    }

    /// Highest single-day spend in the trend
    pub fn peak_day(&self) -> Option<&DailyPoint> {
        self.trend
            .iter()
            .filter(|p| p.expenses.is_positive())
            .max_by_key(|p| p.expenses)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let c = self.currency;
        let mut output = String::new();

        output.push_str(&format!("Spending Analytics as of {}\n", self.today));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let cmp = &self.comparison;
        let arrow = match cmp.change_type {
            ChangeType::Increase => "up",
            ChangeType::Decrease => "down",
            ChangeType::Same => "no change",
        };
        output.push_str("Monthly Comparison\n");
        output.push_str(&format!("  {:<16} {:>14}\n", "This month", c.format(cmp.current)));
        output.push_str(&format!("  {:<16} {:>14}\n", "Last month", c.format(cmp.previous)));
        output.push_str(&format!("  {:<16} {:>13.1}% ({})\n\n", "Change", cmp.change_pct.abs(), arrow));

        let total: crate::models::Money = self.trend.iter().map(|p| p.expenses).sum();
        output.push_str(&format!("Last {} days: {} spent", self.trend.len(), c.format(total)));
        if let Some(peak) = self.peak_day() {
            output.push_str(&format!(
                ", peak {} on {}",
                c.format(peak.expenses),
                peak.date.format("%b %-d")
            ));
        }
        output.push_str("\n\n");

        output.push_str(&format!("{:<24} {:>14} {:>8}\n", "Category", "Amount", "%"));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.categories.is_empty() {
            output.push_str("No spending this month.\n");
        }
        for row in &self.categories {
            output.push_str(&format!(
                "{:<24} {:>14} {:>7.1}%\n",
                row.category.name(),
                c.format(row.amount),
                row.percent
            ));
        }

        output
    }

    /// Export the daily trend and category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> SpendwiseResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let err = |e: csv::Error| SpendwiseError::Export(e.to_string());

        wtr.write_record(["Section", "Key", "Amount", "Percentage"]).map_err(err)?;
        for point in &self.trend {
            wtr.write_record([
                "daily".to_string(),
                point.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", point.expenses.as_f64()),
                String::new(),
            ])
            .map_err(err)?;
        }
        for row in &self.categories {
            wtr.write_record([
                "category".to_string(),
                row.category.name().to_string(),
                format!("{:.2}", row.amount.as_f64()),
                format!("{:.2}", row.percent),
            ])
            .map_err(err)?;
        }
        wtr.write_record([
            "comparison".to_string(),
            self.comparison.current_month.to_string(),
            format!("{:.2}", self.comparison.current.as_f64()),
            format!("{:.2}", self.comparison.change_pct),
        ])
        .map_err(err)?;

        wtr.flush()
            .map_err(|e| SpendwiseError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendwisePaths;
    use crate::models::{Category, Money, Transaction, UserId};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, UserId::new()).unwrap();
        (temp_dir, storage)
    }

    fn spend(storage: &Storage, category: &str, cents: i64, on: NaiveDate) {
        storage
            .transactions
            .upsert(Transaction::new(
                storage.user_id(),
                TransactionType::Expense,
                Money::from_cents(cents),
                Category::new(category),
                on,
            ))
            .unwrap();
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_generate_analytics() {
        let (_temp, storage) = create_test_storage();
        spend(&storage, "Food", 4_000, date(2, 20));
        spend(&storage, "Food", 3_000, date(3, 2));
        spend(&storage, "Transport", 3_000, date(3, 5));

        let report = AnalyticsReport::generate(&storage, date(3, 10)).unwrap();
        assert_eq!(report.trend.len(), 30);
        assert_eq!(report.comparison.current, Money::from_cents(6_000));
        assert_eq!(report.comparison.change_type, ChangeType::Increase);
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.peak_day().unwrap().expenses, Money::from_cents(4_000));

        let text = report.format_terminal();
        assert!(text.contains("This month"));
        assert!(text.contains("Transport"));
    }

    #[test]
    fn test_export_csv() {
        let (_temp, storage) = create_test_storage();
        spend(&storage, "Food", 1_250, date(3, 9));

        let report = AnalyticsReport::generate(&storage, date(3, 10)).unwrap();
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        assert!(csv.starts_with("Section,Key,Amount,Percentage\n"));
        assert!(csv.contains("daily,2025-03-09,12.50,"));
        assert!(csv.contains("category,Food,12.50,100.00"));
        assert!(csv.contains("comparison,2025-03,12.50,100.00"));
    }
}
