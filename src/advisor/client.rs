use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LlmClient;
use crate::config::AdvisorSettings;
use crate::error::{SpendwiseError, SpendwiseResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: Content,
}

fn text_content(role: &str, text: &str) -> Content {
    Content {
        role: role.to_string(),
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    }
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> SpendwiseResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SpendwiseError::Advisor(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from settings, reading the key from the configured
    /// environment variable
    pub fn from_settings(settings: &AdvisorSettings) -> SpendwiseResult<Self> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SpendwiseError::Advisor(format!(
                    "No API key found. Set {} to use the assistant.",
                    settings.api_key_env
                ))
            })?;

        Self::new(
            api_key,
            settings.model.clone(),
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl LlmClient for GeminiClient {
    fn generate_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema: &Value,
    ) -> SpendwiseResult<String> {
        let endpoint = self.endpoint();
        let payload = GenerateContentRequest {
            contents: vec![text_content("user", user_prompt)],
            system_instruction: Some(text_content("user", system_prompt)),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(schema.clone()),
            },
        };

        info!("requesting completion from {}", self.model);
        debug!("POST {}", endpoint);

        let res = self
            .client
            .post(format!("{}?key={}", endpoint, self.api_key))
            .json(&payload)
            .send()
            .map_err(|e| SpendwiseError::Advisor(format!("Request failed: {}", e.without_url())))?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().unwrap_or_default();
            return Err(SpendwiseError::Advisor(format!(
                "Gemini API error (status {}): {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res
            .json()
            .map_err(|e| SpendwiseError::Advisor(format!("Unreadable response: {}", e.without_url())))?;

        body.candidates
            .ok_or_else(|| SpendwiseError::Advisor("No candidates returned".to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| SpendwiseError::Advisor("Empty candidates list".to_string()))?
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| SpendwiseError::Advisor("No parts in content".to_string()))?
            .text
            .ok_or_else(|| SpendwiseError::Advisor("Model returned non-text content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let payload = GenerateContentRequest {
            contents: vec![text_content("user", "hello")],
            system_instruction: Some(text_content("user", "be nice")),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(json!({"type": "object"})),
            },
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be nice");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "object");
    }

    #[test]
    fn test_response_parsing() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "{\"answer\":\"hi\"}"}]}}]
        }))
        .unwrap();
        let first = &body.candidates.unwrap()[0];
        assert_eq!(first.content.parts[0].text.as_deref(), Some("{\"answer\":\"hi\"}"));
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let settings = AdvisorSettings {
            api_key_env: "SPENDWISE_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..Default::default()
        };
        let err = GeminiClient::from_settings(&settings).err().unwrap();
        assert!(err.to_string().contains("SPENDWISE_TEST_KEY_THAT_IS_NOT_SET"));
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let client = GeminiClient::new(
            "k".into(),
            "gemini-2.0-flash",
            "https://example.test/v1beta/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
