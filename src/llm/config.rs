//! LLM configuration parsed from environment variables.
//!
//! Provider-specific settings live inside the [`ProviderConfig`] variants so
//! the Anthropic path carries no OpenAI baggage and vice versa.

use super::types::LlmError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    ChatCompletions,
    Responses,
}

impl OpenAiApiMode {
    /// Parse `LLM_OPENAI_MODE`. `None` defaults to the Responses API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] for an unrecognized mode.
    pub fn parse(raw: Option<&str>) -> Result<Self, LlmError> {
        match raw.unwrap_or("responses") {
            "responses" => Ok(Self::Responses),
            "chat_completions" => Ok(Self::ChatCompletions),
            other => Err(LlmError::ConfigParse(format!(
                "unsupported openai mode '{other}' (expected 'responses' or 'chat_completions')"
            ))),
        }
    }
}

/// Which provider backs Nexus, with its provider-specific settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    Anthropic,
    OpenAi { mode: OpenAiApiMode, base_url: String },
}

impl ProviderConfig {
    fn from_env() -> Result<Self, LlmError> {
        match std::env::var("LLM_PROVIDER").ok().as_deref().unwrap_or("anthropic") {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => {
                let mode = OpenAiApiMode::parse(std::env::var("LLM_OPENAI_MODE").ok().as_deref())?;
                let base_url = std::env::var("LLM_OPENAI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string();
                Ok(Self::OpenAi { mode, base_url })
            }
            other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
        }
    }

    /// Model used when `LLM_MODEL` is unset.
    #[must_use]
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5-20250929",
            Self::OpenAi { .. } => "gpt-4o",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for LlmTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl LlmTimeouts {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS", defaults.request_secs),
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", defaults.connect_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: ProviderConfig,
    pub api_key: String,
    pub model: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Required:
    /// - `LLM_API_KEY_ENV` (names the env var containing the key)
    ///
    /// Optional:
    /// - `LLM_PROVIDER`: `anthropic` (default) or `openai`
    /// - `LLM_MODEL`: provider default when absent
    /// - `LLM_OPENAI_MODE`, `LLM_OPENAI_BASE_URL` (OpenAI only)
    /// - `LLM_REQUEST_TIMEOUT_SECS`, `LLM_CONNECT_TIMEOUT_SECS`
    ///
    /// # Errors
    ///
    /// Returns an error if the API key env var is absent or a value fails to
    /// parse.
    pub fn from_env() -> Result<Self, LlmError> {
        let provider = ProviderConfig::from_env()?;

        let key_var =
            std::env::var("LLM_API_KEY_ENV").map_err(|_| LlmError::MissingApiKey { var: "LLM_API_KEY_ENV".into() })?;
        let api_key = std::env::var(&key_var).map_err(|_| LlmError::MissingApiKey { var: key_var.clone() })?;

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| provider.default_model().to_string());
        let timeouts = LlmTimeouts::from_env();

        Ok(Self { provider, api_key, model, timeouts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
