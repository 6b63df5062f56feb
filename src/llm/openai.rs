//! OpenAI-compatible API client.
//!
//! Supports both `/v1/chat/completions` and `/v1/responses`. JSON mode maps
//! to `response_format` on the former and `text.format` on the latter.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::{LlmTimeouts, OpenAiApiMode};
use super::types::{CompletionRequest, LlmError};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    mode: OpenAiApiMode,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        mode: OpenAiApiMode,
        base_url: String,
        timeouts: LlmTimeouts,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url, mode })
    }

    pub async fn chat(&self, model: &str, request: &CompletionRequest) -> Result<String, LlmError> {
        match self.mode {
            OpenAiApiMode::ChatCompletions => {
                let body = build_chat_completions_request(model, request);
                let text = self.send_json("/chat/completions", &body).await?;
                parse_chat_completions_response(&text)
            }
            OpenAiApiMode::Responses => {
                let body = build_responses_request(model, request);
                let text = self.send_json("/responses", &body).await?;
                parse_responses_response(&text)
            }
        }
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// CHAT COMPLETIONS WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<CcMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct CcMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self { format_type: "json_object" }
    }
}

fn build_chat_completions_request<'a>(model: &'a str, request: &'a CompletionRequest) -> CcRequest<'a> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    if !request.system.trim().is_empty() {
        messages.push(CcMessage { role: "system", content: &request.system });
    }
    messages.extend(
        request
            .messages
            .iter()
            .map(|m| CcMessage { role: &m.role, content: &m.content }),
    );
    CcRequest {
        model,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        messages,
        response_format: request.json_response.then(ResponseFormat::json_object),
    }
}

// =============================================================================
// RESPONSES WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
struct RespRequest<'a> {
    model: &'a str,
    max_output_tokens: u32,
    temperature: f32,
    instructions: &'a str,
    input: Vec<RespInputItem<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<RespTextConfig>,
}

#[derive(Debug, Serialize)]
struct RespInputItem<'a> {
    #[serde(rename = "type")]
    item_type: &'static str,
    role: &'a str,
    content: Vec<RespTextContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RespTextContent<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct RespTextConfig {
    format: ResponseFormat,
}

fn build_responses_request<'a>(model: &'a str, request: &'a CompletionRequest) -> RespRequest<'a> {
    let input = request
        .messages
        .iter()
        .map(|m| RespInputItem {
            item_type: "message",
            role: &m.role,
            content: vec![RespTextContent { content_type: "input_text", text: &m.content }],
        })
        .collect();
    RespRequest {
        model,
        max_output_tokens: request.max_tokens,
        temperature: request.temperature,
        instructions: &request.system,
        input,
        text: request
            .json_response
            .then(|| RespTextConfig { format: ResponseFormat::json_object() }),
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Extract `choices[0].message.content`. A null or absent content yields an
/// empty string; the caller decides what an empty reply means.
pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };

    Ok(choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

/// Concatenate every `output_text` part of every `message` output item,
/// falling back to the top-level `output_text` convenience field.
pub(crate) fn parse_responses_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let mut text = String::new();
    if let Some(items) = root.get("output").and_then(Value::as_array) {
        for item in items {
            if item.get("type").and_then(Value::as_str) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for part in parts {
                let kind = part.get("type").and_then(Value::as_str);
                if matches!(kind, Some("output_text" | "text")) {
                    if let Some(t) = part.get("text").and_then(Value::as_str) {
                        text.push_str(t);
                    }
                }
            }
        }
    } else if let Some(output_text) = root.get("output_text").and_then(Value::as_str) {
        text.push_str(output_text);
    }

    Ok(text)
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
