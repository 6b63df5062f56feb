use super::*;
use crate::llm::types::LlmError;
use crate::state::test_helpers::{MockLlm, test_app_state_with_llm};
use serde_json::json;
use std::sync::Arc;

async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn call_generate(state: AppState, prompt: &str) -> Response {
    generate(State(state), Json(GenerateBody { prompt: prompt.into() }))
        .await
        .into_response()
}

async fn call_edit(state: AppState, prompt: &str, animation: Value) -> Response {
    edit(State(state), Json(EditBody { prompt: prompt.into(), animation }))
        .await
        .into_response()
}

#[tokio::test]
async fn generate_returns_document_as_top_level_json() {
    let llm = Arc::new(MockLlm::replying(r#"{"v":5.5,"w":512,"h":512,"layers":[]}"#));
    let state = test_app_state_with_llm(llm.clone());

    let (status, body) = read_json(call_generate(state, "a red circle").await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "v": 5.5, "w": 512, "h": 512, "layers": [] }));
    assert_eq!(llm.seen.lock().unwrap()[0].messages[0].content, "a red circle");
}

#[tokio::test]
async fn edit_with_malformed_reply_returns_envelope() {
    let state = test_app_state_with_llm(Arc::new(MockLlm::replying("not json")));
    let animation = json!({ "v": "5.5", "w": 100, "h": 100, "layers": [] });

    let (status, body) = read_json(call_edit(state, "make it blue", animation).await).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Invalid response from OpenAI", "raw": "not json" }));
}

#[tokio::test]
async fn edit_forwards_current_document() {
    let llm = Arc::new(MockLlm::replying(r#"{"v":"5.5","w":100,"h":100,"layers":[{"nm":"a"}]}"#));
    let state = test_app_state_with_llm(llm.clone());
    let animation = json!({ "v": "5.5", "w": 100, "h": 100, "layers": [] });

    let (status, _) = read_json(call_edit(state, "add a layer", animation.clone()).await).await;
    assert_eq!(status, StatusCode::OK);
    let seen = llm.seen.lock().unwrap();
    assert_eq!(seen[0].messages[0].content, format!("JSON:{animation}\nPrompt:add a layer"));
}

#[tokio::test]
async fn upstream_failure_returns_error_without_raw() {
    let body = json!({ "error": { "message": "Rate limit reached" } }).to_string();
    let llm = MockLlm::new(vec![Err(LlmError::ApiResponse { status: 429, body })]);
    let state = test_app_state_with_llm(Arc::new(llm));

    let (status, body) = read_json(call_generate(state, "x").await).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Rate limit reached" }));
}

#[tokio::test]
async fn missing_llm_returns_error_envelope() {
    let (status, body) = read_json(call_generate(AppState::default(), "x").await).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "completion service not configured");
    assert!(body.get("raw").is_none());
}

#[test]
fn error_body_round_trips_optional_raw() {
    let parsed: ErrorBody = serde_json::from_value(json!({ "error": "boom" })).unwrap();
    assert_eq!(parsed, ErrorBody { error: "boom".into(), raw: None });
}
