use anyhow::{Context, Result};

use crate::llm_client::LlmConfig;

pub const DEFAULT_API_BASE: &str = "https://api.siliconflow.cn/v1";
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3";

/// Application configuration loaded from environment variables.
/// Read once at startup; handlers never touch the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider secret. Optional at startup: without it `/api/generate` answers 500.
    pub ai_api_key: Option<String>,
    pub ai_api_base: String,
    pub ai_model: String,
    pub static_dir: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ai_api_key: optional_env("AI_API_KEY"),
            ai_api_base: optional_env("AI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            ai_model: optional_env("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            static_dir: optional_env("STATIC_DIR").unwrap_or_else(|| "public".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Model invoker settings, or `None` when no API key is configured.
    pub fn llm_config(&self) -> Option<LlmConfig> {
        self.ai_api_key.as_ref().map(|key| {
            LlmConfig::new(
                self.ai_api_base.clone(),
                key.clone(),
                self.ai_model.clone(),
            )
        })
    }
}

/// Treats unset and blank variables the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
