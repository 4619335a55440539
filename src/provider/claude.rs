//! Anthropic Claude provider
//!
//! Calls the Messages API (`/v1/messages`) with the persona system prompt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::ClaudeSettings;
use crate::error::{Error, Result};
use crate::persona::Persona;
use crate::storage::OrgSettings;

use super::prompt::build_system_prompt;
use super::Provider;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude Messages API provider
pub struct ClaudeProvider {
    settings: ClaudeSettings,
    client: Client,
    messages_url: String,
}

impl ClaudeProvider {
    /// Create a provider. Fails when no API key is configured.
    pub fn new(settings: ClaudeSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(Error::ProviderCredentials {
                provider: "claude".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let messages_url = format!("{}/v1/messages", settings.base_url.trim_end_matches('/'));
        info!(url = %messages_url, model = %settings.model, "Claude provider created");

        Ok(Self {
            settings,
            client,
            messages_url,
        })
    }

    fn request_body(&self, system_prompt: &str, question: &str) -> Value {
        json!({
            "model": self.settings.model,
            "max_tokens": self.settings.max_tokens,
            "system": system_prompt,
            "messages": [
                { "role": "user", "content": question }
            ],
        })
    }
}

/// Text of the first content block.
fn extract_text(body: &Value) -> Result<String> {
    body.get("content")
        .and_then(|c| c.get(0))
        .and_then(|block| block.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::provider_response("Claude", "no text content in API response"))
}

#[async_trait]
impl Provider for ClaudeProvider {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn display_name(&self) -> &'static str {
        "Claude"
    }

    async fn generate(
        &self,
        persona: &Persona,
        org: &OrgSettings,
        knowledge: &str,
        question: &str,
    ) -> Result<String> {
        let system_prompt = build_system_prompt(persona, org, knowledge);
        let body = self.request_body(&system_prompt, question);
        debug!(persona = %persona.id, model = %self.settings.model, "Sending messages request");

        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider_request("Claude", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::provider_request(
                "Claude",
                format!("API error {}: {}", status, text),
            ));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| Error::provider_response("Claude", e.to_string()))?;
        extract_text(&parsed)
    }
}
