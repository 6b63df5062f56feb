use super::*;
use crate::state::test_helpers::MockLlm;
use serde_json::json;

// =========================================================================
// prompt construction
// =========================================================================

#[test]
fn generate_request_passes_prompt_verbatim() {
    let req = build_generate_request("a red circle", 4096);
    assert_eq!(req.system, GENERATE_SYSTEM_PROMPT);
    assert_eq!(req.messages, vec![Message::user("a red circle")]);
    assert!(req.json_response);
    assert!(req.temperature.abs() < f32::EPSILON);
    assert_eq!(req.max_tokens, 4096);
}

#[test]
fn edit_request_embeds_compact_document_then_prompt() {
    let animation = json!({ "v": "5.5", "w": 100, "h": 100, "layers": [] });
    let req = build_edit_request("make it bigger", &animation, 2048);
    assert_eq!(req.system, EDIT_SYSTEM_PROMPT);
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, "user");
    assert_eq!(req.messages[0].content, format!("JSON:{animation}\nPrompt:make it bigger"));
    assert!(req.messages[0].content.starts_with("JSON:{"));
    assert!(req.json_response);
}

// =========================================================================
// parse_completion
// =========================================================================

#[test]
fn parse_completion_returns_json_verbatim() {
    let value = parse_completion(r#"{"v":5.5,"w":512,"h":512,"layers":[]}"#).unwrap();
    assert_eq!(value, json!({ "v": 5.5, "w": 512, "h": 512, "layers": [] }));
}

#[test]
fn parse_completion_treats_empty_as_empty_object() {
    assert_eq!(parse_completion("").unwrap(), json!({}));
}

#[test]
fn parse_completion_keeps_raw_text_on_failure() {
    let err = parse_completion("not json").unwrap_err();
    assert!(matches!(&err, ProxyError::UpstreamParse { raw } if raw == "not json"));
    assert_eq!(err.to_string(), "Invalid response from OpenAI");
}

// =========================================================================
// generate / edit
// =========================================================================

#[tokio::test]
async fn generate_returns_parsed_document() {
    let llm = MockLlm::replying(r#"{"v":5.5,"w":512,"h":512,"layers":[]}"#);
    let value = generate(&llm, "a red circle", 4096).await.unwrap();
    assert_eq!(value, json!({ "v": 5.5, "w": 512, "h": 512, "layers": [] }));

    let seen = llm.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].messages[0].content, "a red circle");
}

#[tokio::test]
async fn edit_surfaces_parse_failure_with_raw() {
    let llm = MockLlm::replying("not json");
    let animation = json!({ "v": "5.5", "w": 10, "h": 10, "layers": [] });
    let err = edit(&llm, "recolor", &animation, 4096).await.unwrap_err();
    assert!(matches!(err, ProxyError::UpstreamParse { raw } if raw == "not json"));
}

#[tokio::test]
async fn upstream_failure_maps_to_request_error() {
    let llm = MockLlm::new(vec![Err(LlmError::ApiRequest("connection reset".into()))]);
    let err = generate(&llm, "x", 4096).await.unwrap_err();
    assert!(matches!(err, ProxyError::UpstreamRequest(_)));
    assert_eq!(err.to_string(), "API request failed: connection reset");
}

#[tokio::test]
async fn each_call_is_independent() {
    let llm = MockLlm::new(vec![Ok(r#"{"a":1}"#.into()), Ok(r#"{"b":2}"#.into())]);
    assert_eq!(generate(&llm, "one", 16).await.unwrap(), json!({ "a": 1 }));
    assert_eq!(generate(&llm, "two", 16).await.unwrap(), json!({ "b": 2 }));

    let seen = llm.seen.lock().unwrap();
    assert_eq!(seen[1].messages.len(), 1);
    assert_eq!(seen[1].messages[0].content, "two");
}
