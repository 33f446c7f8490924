//! Budget recommendations
//!
//! Sends the user's spending and income to the model and turns its answer into
//! budgets that fit this application's categories.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::prompts::{recommendation_schema, recommendation_user_prompt, RECOMMEND_SYSTEM_PROMPT};
use super::{parse_model_json, LlmClient};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Budget, Category, Money, MonthKey, Transaction};
use crate::services::{BudgetService, CreateBudgetInput};

/// Category and amount of one expense, as sent to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTransaction {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub transactions: Vec<RecommendationTransaction>,
    pub monthly_income: f64,
}

impl RecommendationInput {
    /// Build the input from the user's expenses
    pub fn from_transactions(transactions: &[Transaction], monthly_income: Money) -> Self {
        Self {
            transactions: transactions
                .iter()
                .filter(|t| t.is_expense())
                .map(|t| RecommendationTransaction {
                    category: t.category.to_string(),
                    amount: t.amount.as_f64(),
                })
                .collect(),
            monthly_income: monthly_income.as_f64(),
        }
    }
}

/// A recommendation as the model returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecommendation {
    category: String,
    recommended_budget: f64,
    #[serde(default)]
    reason: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawRecommendationOutput {
    #[serde(default)]
    recommendations: Vec<RawRecommendation>,
}

/// A validated recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: Category,
    pub recommended_budget: Money,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecommendationOutput {
    pub recommendations: Vec<Recommendation>,
}

/// A recommendation that `apply_recommendations` did not turn into a budget
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecommendation {
    pub category: Category,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ApplyOutcome {
    pub created: Vec<Budget>,
    pub skipped: Vec<SkippedRecommendation>,
}

/// Asks the model for per-category monthly budgets
pub struct BudgetAdvisor<'a, C: LlmClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: LlmClient + ?Sized> BudgetAdvisor<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Request recommendations; `known` lists the categories the user can budget
    pub fn recommend(
        &self,
        input: &RecommendationInput,
        known: &[Category],
    ) -> SpendwiseResult<RecommendationOutput> {
        if !input.monthly_income.is_finite() || input.monthly_income <= 0.0 {
            return Err(SpendwiseError::Validation(
                "Monthly income must be greater than zero".into(),
            ));
        }

        let names: Vec<String> = known.iter().map(|c| c.to_string()).collect();
        info!(
            "requesting budget recommendations from {} expenses",
            input.transactions.len()
        );
        let raw = self.client.generate_json(
            RECOMMEND_SYSTEM_PROMPT,
            &recommendation_user_prompt(input, &names),
            &recommendation_schema(),
        )?;
        let parsed: RawRecommendationOutput = parse_model_json(&raw)?;

        let recommendations = parsed
            .recommendations
            .into_iter()
            .filter_map(|r| normalize(r, known))
            .collect();
        Ok(RecommendationOutput { recommendations })
    }
}

fn normalize(raw: RawRecommendation, known: &[Category]) -> Option<Recommendation> {
    if !raw.recommended_budget.is_finite() || raw.recommended_budget < 0.0 {
        warn!(
            "dropping recommendation for '{}' with amount {}",
            raw.category, raw.recommended_budget
        );
        return None;
    }
    let Some(amount) = Money::from_f64(raw.recommended_budget) else {
        warn!("dropping recommendation for '{}': amount out of range", raw.category);
        return None;
    };

    let category = known
        .iter()
        .find(|c| c.matches(&raw.category))
        .cloned()
        .unwrap_or_else(|| {
            warn!("unknown category '{}' in recommendation, using Other", raw.category);
            Category::other()
        });
    if category.is_income() {
        warn!("dropping recommendation for the Income category");
        return None;
    }

    Some(Recommendation {
        category,
        recommended_budget: amount,
        reason: raw.reason.trim().to_string(),
    })
}

/// Create budgets for `month` from recommendations
///
/// Categories that already have a budget, and recommendations the budget
/// rules reject, are reported in `skipped`.
pub fn apply_recommendations(
    service: &BudgetService<'_>,
    month: MonthKey,
    recommendations: &[Recommendation],
) -> SpendwiseResult<ApplyOutcome> {
    let mut outcome = ApplyOutcome::default();

    for rec in recommendations {
        if service.find_for(rec.category.name(), month)?.is_some() {
            outcome.skipped.push(SkippedRecommendation {
                category: rec.category.clone(),
                reason: format!("already has a budget for {}", month),
            });
            continue;
        }

        let result = service.set(CreateBudgetInput {
            category: rec.category.to_string(),
            amount: rec.recommended_budget,
            month,
        });
        match result {
            Ok(budget) => outcome.created.push(budget),
            Err(e @ (SpendwiseError::Budget(_)
            | SpendwiseError::Validation(_)
            | SpendwiseError::NotFound { .. }
            | SpendwiseError::Duplicate { .. })) => {
                outcome.skipped.push(SkippedRecommendation {
                    category: rec.category.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcome)
}
