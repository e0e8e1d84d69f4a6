use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

use super::ChatProvider;
use crate::config::OpenAIConfig;
use crate::error::{VectorError, VectorResult};
use crate::models::{ChatMessage, ChatSettings};

/// OpenAI chat-completions provider
pub struct OpenAIChatProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIChatProvider {
    pub fn new(config: OpenAIConfig) -> VectorResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatProvider for OpenAIChatProvider {
    #[instrument(skip(self, settings, messages), fields(model = %settings.model, messages = messages.len()))]
    async fn complete(
        &self,
        settings: &ChatSettings,
        messages: &[ChatMessage],
    ) -> VectorResult<String> {
        let request = CompletionRequest {
            model: &settings.model,
            messages,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| VectorError::Chat(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, body = %error_text, "Chat completion rejected");
            return Err(VectorError::Chat(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| VectorError::Chat(format!("Invalid completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| VectorError::Chat("No completion choices returned".to_string()))
    }
}
