use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable consulted when `insight.api_key` is empty.
pub const API_KEY_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub insight: InsightConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3978,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Request an AI insight after every transcript entry and prose summaries at the end.
    pub enabled: bool,
    /// Base URL of an OpenAI-compatible inference endpoint.
    pub endpoint: String,
    pub model: String,
    /// Bearer token. Empty means "read GITHUB_TOKEN".
    pub api_key: String,
    /// Upper bound on a single insight or summary request.
    pub timeout_seconds: u64,
    pub insight_max_tokens: u32,
    pub summary_max_tokens: u32,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://models.github.ai/inference".to_string(),
            model: "openai/gpt-4.1-nano".to_string(),
            api_key: String::new(),
            timeout_seconds: 30,
            insight_max_tokens: 500,
            summary_max_tokens: 2000,
        }
    }
}

impl InsightConfig {
    /// The configured key, falling back to the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        let configured = self.api_key.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }

        std::env::var(API_KEY_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}
