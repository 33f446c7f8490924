//! Conversational financial coach

use log::info;
use serde::{Deserialize, Serialize};

use super::prompts::{coach_schema, coach_user_prompt, COACH_SYSTEM_PROMPT};
use super::{parse_model_json, LlmClient};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Transaction, TransactionType};

/// A transaction as presented to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachTransaction {
    pub category: String,
    pub amount: f64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl From<&Transaction> for CoachTransaction {
    fn from(txn: &Transaction) -> Self {
        Self {
            category: txn.category.to_string(),
            amount: txn.amount.as_f64(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            description: txn.description.clone(),
            kind: txn.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachInput {
    pub transactions: Vec<CoachTransaction>,
    pub query: String,
}

impl CoachInput {
    /// Build the input from the newest `limit` transactions
    pub fn from_transactions(transactions: &[Transaction], query: impl Into<String>, limit: usize) -> Self {
        Self {
            transactions: transactions.iter().take(limit).map(CoachTransaction::from).collect(),
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachOutput {
    pub answer: String,
}

/// Answers free-form questions about the user's finances
pub struct FinancialCoach<'a, C: LlmClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: LlmClient + ?Sized> FinancialCoach<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub fn ask(&self, input: &CoachInput) -> SpendwiseResult<CoachOutput> {
        if input.query.trim().is_empty() {
            return Err(SpendwiseError::Validation(
                "Ask a question about your finances first".into(),
            ));
        }

        info!(
            "asking coach with {} transactions of context",
            input.transactions.len()
        );
        let raw = self
            .client
            .generate_json(COACH_SYSTEM_PROMPT, &coach_user_prompt(input), &coach_schema())?;
        let output: CoachOutput = parse_model_json(&raw)?;

        if output.answer.trim().is_empty() {
            return Err(SpendwiseError::Advisor("The coach returned an empty answer".into()));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::tests::ScriptedClient;
    use crate::models::{Category, Money, UserId};
    use chrono::NaiveDate;

    fn sample() -> Vec<Transaction> {
        vec![Transaction::new(
            UserId::new(),
            TransactionType::Expense,
            Money::from_cents(4550),
            Category::new("Food"),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        )
        .with_description("Pizza night")]
    }

    #[test]
    fn test_ask_returns_answer() {
        let client = ScriptedClient::new("```json\n{\"answer\": \"You spent $45.50 on food.\"}\n```");
        let input = CoachInput::from_transactions(&sample(), "How much on food?", 100);

        let output = FinancialCoach::new(&client).ask(&input).unwrap();
        assert_eq!(output.answer, "You spent $45.50 on food.");

        let prompt = client.last_user_prompt();
        assert!(prompt.contains("\"How much on food?\""));
        assert!(prompt.contains("Type: expense, Category: Food, Amount: 45.50, Description: Pizza night"));
    }

    #[test]
    fn test_empty_query_skips_model() {
        let client = ScriptedClient::new("{\"answer\": \"unused\"}");
        let input = CoachInput::from_transactions(&sample(), "   ", 100);

        assert!(FinancialCoach::new(&client).ask(&input).unwrap_err().is_validation());
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn test_garbage_output_is_advisor_error() {
        let client = ScriptedClient::new("I think you are doing great!");
        let input = CoachInput::from_transactions(&sample(), "How am I doing?", 100);
        assert!(matches!(
            FinancialCoach::new(&client).ask(&input),
            Err(SpendwiseError::Advisor(_))
        ));
    }

    #[test]
    fn test_history_limit() {
        let mut txns = sample();
        txns.extend(sample());
        let input = CoachInput::from_transactions(&txns, "q", 1);
        assert_eq!(input.transactions.len(), 1);
        assert_eq!(input.transactions[0].date, "2025-03-03");
    }
}
