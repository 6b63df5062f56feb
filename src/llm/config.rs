//! Completion-service settings.
//!
//! Values come from a key lookup so that `from_env` and tests share one
//! parser; tests pass a map instead of mutating the process environment.

use super::types::LlmError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Anthropic,
    OpenAi,
}

impl LlmProviderKind {
    fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5-20250929",
            Self::OpenAi => "gpt-4o",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    ChatCompletions,
    Responses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub openai_mode: OpenAiApiMode,
    pub openai_base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Read settings from the process environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LLM_PROVIDER` | `openai` (or `anthropic`) |
    /// | `LLM_API_KEY_ENV` | `OPENAI_API_KEY`, the variable holding the credential |
    /// | `LLM_MODEL` | `gpt-4o` / `claude-sonnet-4-5-20250929` |
    /// | `LLM_MAX_TOKENS` | 4096 |
    /// | `LLM_OPENAI_MODE` | `chat_completions` (or `responses`) |
    /// | `LLM_OPENAI_BASE_URL` | `https://api.openai.com/v1` |
    /// | `LLM_REQUEST_TIMEOUT_SECS` | 120 |
    /// | `LLM_CONNECT_TIMEOUT_SECS` | 10 |
    ///
    /// # Errors
    ///
    /// [`LlmError::MissingApiKey`] when the credential is absent or blank,
    /// [`LlmError::ConfigParse`] for any malformed value.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let provider = match get("LLM_PROVIDER").as_deref() {
            None | Some("openai") => LlmProviderKind::OpenAi,
            Some("anthropic") => LlmProviderKind::Anthropic,
            Some(other) => return Err(LlmError::ConfigParse(format!("LLM_PROVIDER: unknown provider `{other}`"))),
        };
        let openai_mode = match get("LLM_OPENAI_MODE").as_deref() {
            None | Some("chat_completions") => OpenAiApiMode::ChatCompletions,
            Some("responses") => OpenAiApiMode::Responses,
            Some(other) => {
                return Err(LlmError::ConfigParse(format!(
                    "LLM_OPENAI_MODE: expected `chat_completions` or `responses`, got `{other}`"
                )));
            }
        };

        let key_var = get("LLM_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let Some(api_key) = get(&key_var).filter(|key| !key.trim().is_empty()) else {
            return Err(LlmError::MissingApiKey { var: key_var });
        };

        let model = get("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_string());
        let openai_base_url = get("LLM_OPENAI_BASE_URL")
            .map_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string(), |url| url.trim_end_matches('/').to_string());

        Ok(Self {
            provider,
            api_key,
            model,
            max_tokens: parse_or(&get, "LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS)?,
            openai_mode,
            openai_base_url,
            timeouts: LlmTimeouts {
                request_secs: parse_or(&get, "LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS)?,
                connect_secs: parse_or(&get, "LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS)?,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, LlmError> {
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| LlmError::ConfigParse(format!("{key}: `{raw}` is not a valid number"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
