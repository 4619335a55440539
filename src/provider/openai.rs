//! OpenAI-compatible API provider
//!
//! Sends the persona system prompt and the question to any
//! OpenAI-compatible `chat/completions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::OpenAiSettings;
use crate::error::{Error, Result};
use crate::persona::Persona;
use crate::storage::OrgSettings;

use super::prompt::build_system_prompt;
use super::Provider;

// ─────────────────────────────────────────────────────────────────
// OpenAI API types (request/response)
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// OpenAI Provider
// ─────────────────────────────────────────────────────────────────

/// OpenAI-compatible chat completion provider
pub struct OpenAiProvider {
    settings: OpenAiSettings,
    client: Client,
}

impl OpenAiProvider {
    /// Create a provider. Fails when no API key is configured.
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(Error::ProviderCredentials {
                provider: "openai".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %settings.base_url,
            model = %settings.model,
            "OpenAI-compatible provider created"
        );

        Ok(Self { settings, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }

    fn request_body(&self, system_prompt: String, question: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: question.to_string(),
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }
}

/// First choice's text from a completion response.
fn extract_text(parsed: ChatCompletionResponse) -> Result<String> {
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::provider_response("OpenAI", "no choices in API response"))?;
    Ok(choice.message.content.unwrap_or_default())
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn display_name(&self) -> &'static str {
        "OpenAI"
    }

    async fn generate(
        &self,
        persona: &Persona,
        org: &OrgSettings,
        knowledge: &str,
        question: &str,
    ) -> Result<String> {
        let body = self.request_body(build_system_prompt(persona, org, knowledge), question);
        debug!(persona = %persona.id, model = %body.model, "Sending chat completion");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider_request("OpenAI", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::provider_request(
                "OpenAI",
                format!("API error {}: {}", status, text),
            ));
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| Error::provider_response("OpenAI", e.to_string()))?;
        extract_text(parsed)
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{PersonaId, PersonaRegistry};

    fn settings() -> OpenAiSettings {
        OpenAiSettings {
            api_key: "sk-test-123".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_key_rejected() {
        let result = OpenAiProvider::new(OpenAiSettings::default());
        assert!(matches!(result, Err(Error::ProviderCredentials { .. })));
    }

    #[test]
    fn test_endpoint_and_body() {
        let provider = OpenAiProvider::new(OpenAiSettings {
            base_url: "http://localhost:11434/v1/".to_string(),
            ..settings()
        })
        .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:11434/v1/chat/completions");

        let body = serde_json::to_value(provider.request_body("sys".into(), "q")).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "q");
    }

    #[test]
    fn test_extract_text() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "답변"}, "finish_reason": "stop"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "답변");

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            extract_text(empty),
            Err(Error::ProviderResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let provider = OpenAiProvider::new(OpenAiSettings {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_secs: 2,
            ..settings()
        })
        .unwrap();
        let persona = PersonaRegistry::bundled()
            .unwrap()
            .get(PersonaId::JinPark)
            .unwrap()
            .clone();

        let result = provider
            .generate(&persona, &OrgSettings::default(), "", "q")
            .await;
        assert!(matches!(result, Err(Error::ProviderRequest { .. })));
    }
}
