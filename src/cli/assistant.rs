//! Assistant CLI commands: the financial coach and budget recommendations

use log::debug;

use super::{parse_amount, parse_month};
use crate::advisor::{
    apply_recommendations, BudgetAdvisor, CoachInput, FinancialCoach, LlmClient,
    RecommendationInput,
};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Money, MonthKey, TransactionType};
use crate::reports::dashboard::user_currency;
use crate::reports::{in_month, sum_by_type};
use crate::services::{BudgetService, CategoryService, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Ask the coach a question about the user's finances
pub fn handle_ask_command<C: LlmClient + ?Sized>(
    storage: &Storage,
    client: &C,
    history_limit: usize,
    query: &str,
) -> SpendwiseResult<()> {
    let transactions = TransactionService::new(storage).list(TransactionFilter::new().limit(history_limit))?;
    let input = CoachInput::from_transactions(&transactions, query, history_limit);

    let output = FinancialCoach::new(client).ask(&input)?;
    println!("{}", output.answer.trim());
    Ok(())
}

/// Income used when `--income` is not given: this month's, else last month's
fn recorded_income(transactions: &[crate::models::Transaction], month: MonthKey) -> Option<Money> {
    [month, month.prev()]
        .into_iter()
        .map(|m| sum_by_type(&in_month(transactions, m), TransactionType::Income))
        .find(|income| income.is_positive())
}

/// Ask for budget recommendations and optionally create them for `month`
pub fn handle_recommend_command<C: LlmClient + ?Sized>(
    storage: &Storage,
    client: &C,
    income: Option<&str>,
    month: Option<&str>,
    apply: bool,
) -> SpendwiseResult<()> {
    let currency = user_currency(storage)?;
    let month = parse_month(month)?;
    let transactions = TransactionService::new(storage).list(TransactionFilter::new())?;

    let monthly_income = match income {
        Some(s) => parse_amount(s)?,
        None => recorded_income(&transactions, month).ok_or_else(|| {
            SpendwiseError::Validation(
                "No income recorded for this or last month. Pass --income <AMOUNT>".into(),
            )
        })?,
    };
    debug!("recommending budgets for {} with income {}", month, monthly_income);

    let known = CategoryService::new(storage).expense_categories()?;
    let input = RecommendationInput::from_transactions(&transactions, monthly_income);
    let output = BudgetAdvisor::new(client).recommend(&input, &known)?;

    if output.recommendations.is_empty() {
        println!("The assistant had no recommendations.");
        return Ok(());
    }

    println!(
        "Recommended budgets (monthly income {}):\n",
        currency.format(monthly_income)
    );
    for rec in &output.recommendations {
        println!(
            "  {:<16} {:>12}  {}",
            rec.category.to_string(),
            currency.format(rec.recommended_budget),
            rec.reason
        );
    }

    if !apply {
        println!("\nUse --apply to create these budgets for {}.", month.friendly());
        return Ok(());
    }

    let outcome = apply_recommendations(&BudgetService::new(storage), month, &output.recommendations)?;
    println!();
    for budget in &outcome.created {
        println!(
            "Created budget: {} {} for {}",
            budget.category,
            currency.format(budget.amount),
            month.friendly()
        );
    }
    for skipped in &outcome.skipped {
        println!("Skipped {}: {}", skipped.category, skipped.reason);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::tests::ScriptedClient;
    use crate::config::paths::SpendwisePaths;
    use crate::models::UserId;
    use crate::services::CreateTransactionInput;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, UserId::new()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_recorded_income_falls_back_to_last_month() {
        let (_dir, storage) = storage();
        let month = MonthKey::new(2025, 3).unwrap();
        TransactionService::new(&storage)
            .create(CreateTransactionInput {
                kind: TransactionType::Income,
                amount: Money::from_cents(300_000),
                category: None,
                description: None,
                date: chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                receipt_url: None,
            })
            .unwrap();

        let all = storage.transactions.get_all().unwrap();
        assert_eq!(recorded_income(&all, month), Some(Money::from_cents(300_000)));
        assert_eq!(recorded_income(&all, MonthKey::new(2025, 6).unwrap()), None);
    }

    #[test]
    fn test_recommend_apply_creates_budgets() {
        let (_dir, storage) = storage();
        let client = ScriptedClient::new(
            r#"{"recommendations": [{"category": "Food", "recommendedBudget": 350, "reason": "ok"}]}"#,
        );

        handle_recommend_command(&storage, &client, Some("4000"), Some("2025-04"), true).unwrap();

        let budget = BudgetService::new(&storage)
            .find_for("Food", MonthKey::new(2025, 4).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(budget.amount, Money::from_cents(35_000));
    }

    #[test]
    fn test_recommend_without_income_fails_before_calling_model() {
        let (_dir, storage) = storage();
        let client = ScriptedClient::new("{}");

        let err = handle_recommend_command(&storage, &client, None, Some("2025-04"), false).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(client.calls(), 0);
    }
}
