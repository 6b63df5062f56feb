//! LLM: the completion service behind the proxy endpoints.
//!
//! DESIGN
//! ======
//! `LlmClient` picks a backend (`OpenAI` by default, or Anthropic) from
//! [`config::LlmConfig`] and pins the model and output cap for its lifetime.
//! Everything above this module talks to the [`LlmChat`] trait only, so a
//! stub can replace the network in tests.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmChat;
use types::{CompletionRequest, LlmError};

enum Backend {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

/// Configured completion client.
pub struct LlmClient {
    backend: Backend,
    model: String,
    max_tokens: u32,
}

impl LlmClient {
    /// Client for the settings in the process environment.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_env`] and [`LlmClient::new`].
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let LlmConfig { provider, api_key, model, max_tokens, openai_mode, openai_base_url, timeouts } = config;
        let backend = match provider {
            LlmProviderKind::Anthropic => Backend::Anthropic(anthropic::AnthropicClient::new(api_key, timeouts)?),
            LlmProviderKind::OpenAi => {
                Backend::OpenAi(openai::OpenAiClient::new(api_key, openai_mode, openai_base_url, timeouts)?)
            }
        };
        Ok(Self { backend, model, max_tokens })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        match &self.backend {
            Backend::Anthropic(client) => client.chat(&self.model, request).await,
            Backend::OpenAi(client) => client.chat(&self.model, request).await,
        }
    }
}
