//! Client side of the generate/edit proxy endpoints.
//!
//! DESIGN
//! ======
//! [`ProxyApi`] is the transport seam: [`HttpProxy`] posts JSON to the
//! server, tests substitute a canned reply. [`generate`] and [`edit`] apply
//! the reply to a [`DocStore`] only when it is a valid document, so a failed
//! request or a malformed reply never touches the active document.
//!
//! Requests are not retried and overlapping requests are not coordinated;
//! whichever reply is applied last wins.

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::consts::AI_FALLBACK_MESSAGE;
use crate::doc::{Animation, DocError};
use crate::store::DocStore;

#[derive(Debug, thiserror::Error)]
pub enum AiClientError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("{message}")]
    Upstream { message: String },
    #[error("reply is not an animation: {0}")]
    InvalidDocument(#[from] DocError),
    #[error("no animation loaded")]
    NoDocument,
}

impl AiClientError {
    /// Message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Upstream { message } => message.clone(),
            Self::Request(_) | Self::InvalidDocument(_) | Self::NoDocument => AI_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Transport to the proxy endpoints. Both calls return the reply body on
/// success and never inspect it.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait ProxyApi {
    async fn generate(&self, prompt: &str) -> Result<Value, AiClientError>;
    async fn edit(&self, prompt: &str, animation: &Animation) -> Result<Value, AiClientError>;
}

// =============================================================================
// HTTP TRANSPORT
// =============================================================================

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

pub struct HttpProxy {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProxy {
    /// Proxy rooted at `base_url`; `/generate` and `/edit` are appended.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, AiClientError> {
        let url = format!("{}{path}", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiClientError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorEnvelope>().await {
                Ok(envelope) if !envelope.error.is_empty() => envelope.error,
                _ => AI_FALLBACK_MESSAGE.to_string(),
            };
            warn!(%url, status = status.as_u16(), %message, "ai: proxy returned error");
            return Err(AiClientError::Upstream { message });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AiClientError::Request(e.to_string()))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl ProxyApi for HttpProxy {
    async fn generate(&self, prompt: &str) -> Result<Value, AiClientError> {
        self.post("/generate", json!({ "prompt": prompt })).await
    }

    async fn edit(&self, prompt: &str, animation: &Animation) -> Result<Value, AiClientError> {
        self.post("/edit", json!({ "prompt": prompt, "animation": animation })).await
    }
}

// =============================================================================
// STORE OPERATIONS
// =============================================================================

/// Generate a new animation from `prompt` and make it the active, unsaved document.
///
/// # Errors
///
/// [`AiClientError`] on transport failure, a server error, or a reply that is
/// not a document. The store is unchanged on error.
pub async fn generate(store: &mut DocStore, proxy: &dyn ProxyApi, prompt: &str) -> Result<(), AiClientError> {
    let reply = proxy.generate(prompt).await?;
    store.replace_with_result(reply)?;
    info!(layers = store.layer_names().len(), "ai: generated animation applied");
    Ok(())
}

/// Apply `prompt` to the active document through the proxy.
///
/// # Errors
///
/// [`AiClientError::NoDocument`] when nothing is loaded, otherwise as
/// [`generate`].
pub async fn edit(store: &mut DocStore, proxy: &dyn ProxyApi, prompt: &str) -> Result<(), AiClientError> {
    let current = store.document().ok_or(AiClientError::NoDocument)?;
    let reply = proxy.edit(prompt, current).await?;
    store.replace_with_result(reply)?;
    info!(layers = store.layer_names().len(), "ai: edited animation applied");
    Ok(())
}
