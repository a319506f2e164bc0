//! Large-language-model completions used for live insights and summaries.
//!
//! The assistant only ever talks to an [`InsightProvider`]; which concrete
//! provider backs it is decided once from [`InsightConfig`].

pub mod openai;
pub mod prompts;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{InsightConfig, API_KEY_ENV};

pub use openai::OpenAiCompatibleProvider;

/// A single chat completion: one system message and one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("insight generation is disabled")]
    Disabled,
    #[error("request to completion endpoint failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse completion response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("completion response contained no text")]
    Empty,
    #[error("completion timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

#[async_trait]
pub trait InsightProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError>;
}

/// Provider used when insights are turned off or no credentials exist.
#[derive(Debug, Default)]
pub struct DisabledProvider;

#[async_trait]
impl InsightProvider for DisabledProvider {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, InsightError> {
        Err(InsightError::Disabled)
    }
}

/// Build the provider described by `config`.
///
/// An enabled section without any API key degrades to [`DisabledProvider`].
pub fn from_config(config: &InsightConfig) -> Result<Arc<dyn InsightProvider>> {
    if !config.enabled {
        info!("AI insights disabled in config");
        return Ok(Arc::new(DisabledProvider));
    }

    let Some(api_key) = config.resolve_api_key() else {
        warn!(
            "AI insights enabled but no api_key configured and {} is unset; continuing without insights",
            API_KEY_ENV
        );
        return Ok(Arc::new(DisabledProvider));
    };

    let provider = OpenAiCompatibleProvider::new(&config.endpoint, &config.model, api_key)?;
    Ok(Arc::new(provider))
}
