//! Prompt templates and response schemas for the assistant

use serde_json::{json, Value};

use super::coach::CoachInput;
use super::recommend::RecommendationInput;

pub const COACH_SYSTEM_PROMPT: &str = "You are a friendly and encouraging personal finance coach. \
Your goal is to help the user understand their spending habits and make smarter financial decisions. \
Based on their question and their transaction history, provide a clear, helpful and conversational answer. \
If the question is vague, give actionable insights from the data, for example income against expenses \
and the top spending categories. Always be positive and empowering. \
Respond with a JSON object containing a single \"answer\" string.";

pub const RECOMMEND_SYSTEM_PROMPT: &str = "You are a personal finance advisor. \
Analyze the user's past spending habits and provide personalized monthly budget recommendations. \
For each recommendation include the category, the recommended budget amount and a clear explanation \
of why the change is suggested. Keep recommendations realistic for the user's income and look for \
savings by reallocating funds across categories. \
Respond with a JSON object containing a \"recommendations\" array.";

/// Render the user turn for a coach question
pub fn coach_user_prompt(input: &CoachInput) -> String {
    let mut prompt = format!(
        "The user has asked the following question:\n\"{}\"\n\n\
         Here is a list of the user's recent transactions to provide context for your answer:\n",
        input.query.trim()
    );
    if input.transactions.is_empty() {
        prompt.push_str("(no transactions recorded yet)\n");
    }
    for t in &input.transactions {
        prompt.push_str(&format!(
            "- Date: {}, Type: {}, Category: {}, Amount: {:.2}, Description: {}\n",
            t.date, t.kind, t.category, t.amount, t.description
        ));
    }
    prompt
}

/// Render the user turn for a recommendation request
pub fn recommendation_user_prompt(input: &RecommendationInput, categories: &[String]) -> String {
    let mut prompt = format!(
        "Consider the user's monthly income: {:.2}.\n\n\
         Use only these categories: {}.\n\n\
         Here are the user's recent transactions:\n",
        input.monthly_income,
        categories.join(", ")
    );
    for t in &input.transactions {
        prompt.push_str(&format!("- Category: {}, Amount: {:.2}\n", t.category, t.amount));
    }
    prompt
}

pub fn coach_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "answer": {
                "type": "string",
                "description": "The conversational answer to the user's question."
            }
        },
        "required": ["answer"]
    })
}

pub fn recommendation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recommendations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string" },
                        "recommendedBudget": { "type": "number" },
                        "reason": { "type": "string" }
                    },
                    "required": ["category", "recommendedBudget", "reason"]
                }
            }
        },
        "required": ["recommendations"]
    })
}
