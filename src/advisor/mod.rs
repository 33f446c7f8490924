//! AI assistant
//!
//! A financial coach that answers questions about the user's transactions,
//! and a budget advisor that proposes monthly budgets. Both talk to a
//! language model through the `LlmClient` trait and ask for JSON output
//! matching a schema; `GeminiClient` is the HTTP implementation.

pub mod client;
pub mod coach;
pub mod prompts;
pub mod recommend;

pub use client::GeminiClient;
pub use coach::{CoachInput, CoachOutput, CoachTransaction, FinancialCoach};
pub use recommend::{
    apply_recommendations, ApplyOutcome, BudgetAdvisor, Recommendation, RecommendationInput,
    RecommendationOutput, RecommendationTransaction, SkippedRecommendation,
};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{SpendwiseError, SpendwiseResult};

/// A language model that returns JSON text for a prompt
pub trait LlmClient {
    fn generate_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: &Value,
    ) -> SpendwiseResult<String>;
}

/// Remove a Markdown code fence around a model reply, if present
pub fn strip_json_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub(crate) fn parse_model_json<T: DeserializeOwned>(raw: &str) -> SpendwiseResult<T> {
    serde_json::from_str(strip_json_fence(raw))
        .map_err(|e| SpendwiseError::Advisor(format!("Could not understand the model's reply: {}", e)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Returns a fixed reply and remembers the last prompt it was given
    pub(crate) struct ScriptedClient {
        response: String,
        last_user_prompt: RefCell<String>,
        calls: Cell<usize>,
    }

    impl ScriptedClient {
        pub(crate) fn new(response: &str) -> Self {
            Self {
                response: response.to_string(),
                last_user_prompt: RefCell::new(String::new()),
                calls: Cell::new(0),
            }
        }

        pub(crate) fn last_user_prompt(&self) -> String {
            self.last_user_prompt.borrow().clone()
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl LlmClient for ScriptedClient {
        fn generate_json(&self, _system: &str, user_prompt: &str, _schema: &Value) -> SpendwiseResult<String> {
            self.calls.set(self.calls.get() + 1);
            *self.last_user_prompt.borrow_mut() = user_prompt.to_string();
            Ok(self.response.clone())
        }
    }

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_json_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_json_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_model_json_error() {
        let result: SpendwiseResult<CoachOutput> = parse_model_json("not json");
        assert!(matches!(result, Err(SpendwiseError::Advisor(_))));
    }
}
