//! Proxy service: prompt to completion service to parsed animation JSON.
//!
//! DESIGN
//! ======
//! Both operations build a single system + user exchange, ask the
//! completion service for a JSON object at temperature 0, and parse the
//! reply. Nothing is kept between calls. A reply that is not JSON becomes
//! [`ProxyError::UpstreamParse`] carrying the raw text so the route layer
//! can hand it back in the error envelope.

use serde_json::Value;
use tracing::{info, warn};

use crate::llm::LlmChat;
use crate::llm::types::{CompletionRequest, LlmError, Message};

pub const GENERATE_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates valid Lottie JSON. Respond ONLY with a JSON object for the animation.";

pub const EDIT_SYSTEM_PROMPT: &str = "You are a helpful assistant that edits Lottie JSON according to instructions. \
     Respond ONLY with the updated JSON object.";

/// Message returned to clients when the reply is not parseable JSON.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from OpenAI";

/// Sampling temperature for every request; 0 keeps output deterministic.
const TEMPERATURE: f32 = 0.0;

/// Stand-in for an empty completion.
const EMPTY_COMPLETION: &str = "{}";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("completion service not configured")]
    NotConfigured,
    #[error("{}", .0.client_message())]
    UpstreamRequest(#[from] LlmError),
    #[error("{INVALID_RESPONSE_MESSAGE}")]
    UpstreamParse { raw: String },
}

// =============================================================================
// PROMPTS
// =============================================================================

/// Build the exchange asking for a brand-new animation.
#[must_use]
pub fn build_generate_request(prompt: &str, max_tokens: u32) -> CompletionRequest {
    CompletionRequest {
        system: GENERATE_SYSTEM_PROMPT.to_string(),
        messages: vec![Message::user(prompt)],
        temperature: TEMPERATURE,
        json_response: true,
        max_tokens,
    }
}

/// Build the exchange asking for an edited copy of `animation`.
#[must_use]
pub fn build_edit_request(prompt: &str, animation: &Value, max_tokens: u32) -> CompletionRequest {
    CompletionRequest {
        system: EDIT_SYSTEM_PROMPT.to_string(),
        messages: vec![Message::user(format!("JSON:{animation}\nPrompt:{prompt}"))],
        temperature: TEMPERATURE,
        json_response: true,
        max_tokens,
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Ask the completion service for a new animation described by `prompt`.
///
/// # Errors
///
/// [`ProxyError::UpstreamRequest`] when the service call fails,
/// [`ProxyError::UpstreamParse`] when the reply is not JSON.
pub async fn generate(llm: &dyn LlmChat, prompt: &str, max_tokens: u32) -> Result<Value, ProxyError> {
    info!(prompt_len = prompt.len(), "proxy: generate");
    complete(llm, &build_generate_request(prompt, max_tokens)).await
}

/// Ask the completion service to apply `prompt` to `animation`.
///
/// # Errors
///
/// Same as [`generate`].
pub async fn edit(llm: &dyn LlmChat, prompt: &str, animation: &Value, max_tokens: u32) -> Result<Value, ProxyError> {
    info!(prompt_len = prompt.len(), "proxy: edit");
    complete(llm, &build_edit_request(prompt, animation, max_tokens)).await
}

async fn complete(llm: &dyn LlmChat, request: &CompletionRequest) -> Result<Value, ProxyError> {
    let text = llm.chat(request).await.map_err(|e| {
        warn!(error = %e, "proxy: completion request failed");
        ProxyError::UpstreamRequest(e)
    })?;
    parse_completion(&text)
}

/// Parse the completion text as JSON. Empty text counts as `{}`.
///
/// # Errors
///
/// [`ProxyError::UpstreamParse`] with the raw text when parsing fails.
pub fn parse_completion(text: &str) -> Result<Value, ProxyError> {
    let content = if text.is_empty() { EMPTY_COMPLETION } else { text };
    serde_json::from_str(content).map_err(|e| {
        warn!(error = %e, raw_len = content.len(), "proxy: completion is not valid JSON");
        ProxyError::UpstreamParse { raw: content.to_string() }
    })
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
