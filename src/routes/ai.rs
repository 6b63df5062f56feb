//! AI proxy routes: `POST /generate` and `POST /edit`.
//!
//! Success returns the parsed animation as the top-level JSON body with
//! status 200. Every failure returns `{error, raw?}` with status 500.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::proxy::{self, ProxyError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateBody {
    pub prompt: String,
}

#[derive(Deserialize)]
pub struct EditBody {
    pub prompt: String,
    pub animation: Value,
}

/// Error envelope returned on any failure.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let raw = match &self {
            ProxyError::UpstreamParse { raw } => Some(raw.clone()),
            ProxyError::NotConfigured | ProxyError::UpstreamRequest(_) => None,
        };
        let body = ErrorBody { error: self.to_string(), raw };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// `POST /generate`: create an animation from a prompt.
pub async fn generate(State(state): State<AppState>, Json(body): Json<GenerateBody>) -> Result<Json<Value>, ProxyError> {
    let llm = state.llm.as_deref().ok_or(ProxyError::NotConfigured)?;
    let animation = proxy::generate(llm, &body.prompt, state.max_tokens).await?;
    Ok(Json(animation))
}

/// `POST /edit`: apply a prompt to the supplied animation.
pub async fn edit(State(state): State<AppState>, Json(body): Json<EditBody>) -> Result<Json<Value>, ProxyError> {
    let llm = state.llm.as_deref().ok_or(ProxyError::NotConfigured)?;
    let animation = proxy::edit(llm, &body.prompt, &body.animation, state.max_tokens).await?;
    Ok(Json(animation))
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
