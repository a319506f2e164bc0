use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{CompletionRequest, InsightError, InsightProvider};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
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

/// Chat-completions client for any OpenAI-compatible endpoint
/// (GitHub Models, OpenAI, OpenRouter, a local server).
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(endpoint: &str, model: &str, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let url = format!("{}/chat/completions", endpoint.trim_end_matches('/'));

        info!("Initialized insight provider: {} (model {})", url, model);

        Ok(Self {
            client,
            url,
            model: model.to_string(),
            api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InsightProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_tokens,
        };

        debug!(
            "Requesting completion from {} (max_tokens {})",
            self.url, request.max_tokens
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(
                "Completion request failed with status {}: {}",
                status, response_text
            );
            return Err(InsightError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&response_text)?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(InsightError::Empty)?;

        debug!("Completion received: {} chars", text.len());
        Ok(text)
    }
}
