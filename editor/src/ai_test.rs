use std::sync::Mutex;

use serde_json::json;

use super::*;

/// Proxy that answers every call with the same canned reply and records
/// what it was asked.
struct CannedProxy {
    reply: Result<Value, String>,
    seen: Mutex<Vec<(String, Option<Value>)>>,
}

impl CannedProxy {
    fn ok(value: Value) -> Self {
        Self { reply: Ok(value), seen: Mutex::new(Vec::new()) }
    }

    fn failing(message: &str) -> Self {
        Self { reply: Err(message.to_string()), seen: Mutex::new(Vec::new()) }
    }

    fn answer(&self) -> Result<Value, AiClientError> {
        self.reply
            .clone()
            .map_err(|message| AiClientError::Upstream { message })
    }
}

#[async_trait::async_trait]
impl ProxyApi for CannedProxy {
    async fn generate(&self, prompt: &str) -> Result<Value, AiClientError> {
        self.seen.lock().unwrap().push((prompt.to_string(), None));
        self.answer()
    }

    async fn edit(&self, prompt: &str, animation: &Animation) -> Result<Value, AiClientError> {
        self.seen
            .lock()
            .unwrap()
            .push((prompt.to_string(), Some(animation.to_value())));
        self.answer()
    }
}

fn existing() -> Value {
    json!({ "v": "5.5", "w": 100, "h": 100, "layers": [{ "nm": "a" }] })
}

fn loaded() -> DocStore {
    let mut store = DocStore::new();
    store.load_value(existing()).unwrap();
    store
}

#[tokio::test]
async fn generate_replaces_document_and_marks_dirty() {
    let reply = json!({ "v": 5.5, "w": 512, "h": 512, "layers": [] });
    let proxy = CannedProxy::ok(reply.clone());
    let mut store = DocStore::new();

    generate(&mut store, &proxy, "a red circle").await.unwrap();

    assert_eq!(store.document().map(Animation::to_value), Some(reply));
    assert!(store.is_dirty());
    assert_eq!(proxy.seen.lock().unwrap()[0], ("a red circle".to_string(), None));
}

#[tokio::test]
async fn edit_sends_current_document_and_applies_reply() {
    let reply = json!({ "v": "5.5", "w": 100, "h": 100, "layers": [{ "nm": "a" }, { "nm": "b" }] });
    let proxy = CannedProxy::ok(reply.clone());
    let mut store = loaded();

    edit(&mut store, &proxy, "add a layer").await.unwrap();

    assert_eq!(store.document().map(Animation::to_value), Some(reply));
    assert_eq!(store.selection(), &crate::Selection::all(2));
    assert!(store.is_dirty());
    let seen = proxy.seen.lock().unwrap();
    assert_eq!(seen[0], ("add a layer".to_string(), Some(existing())));
}

#[tokio::test]
async fn server_error_leaves_document_unchanged() {
    let proxy = CannedProxy::failing("Invalid response from OpenAI");
    let mut store = loaded();

    let err = edit(&mut store, &proxy, "make it blue").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid response from OpenAI");
    assert_eq!(store.document().map(Animation::to_value), Some(existing()));
    assert!(!store.is_dirty());
}

#[tokio::test]
async fn reply_that_is_not_a_document_leaves_store_unchanged() {
    let proxy = CannedProxy::ok(json!({ "w": 10 }));
    let mut store = loaded();

    let err = generate(&mut store, &proxy, "x").await.unwrap_err();

    assert!(matches!(err, AiClientError::InvalidDocument(_)));
    assert_eq!(err.user_message(), AI_FALLBACK_MESSAGE);
    assert_eq!(store.document().map(Animation::to_value), Some(existing()));
    assert!(!store.is_dirty());
}

#[tokio::test]
async fn edit_without_document_is_rejected_before_sending() {
    let proxy = CannedProxy::ok(existing());
    let mut store = DocStore::new();

    let err = edit(&mut store, &proxy, "x").await.unwrap_err();

    assert!(matches!(err, AiClientError::NoDocument));
    assert!(proxy.seen.lock().unwrap().is_empty());
    assert!(store.document().is_none());
}

#[tokio::test]
async fn http_proxy_unreachable_is_request_error() {
    let proxy = HttpProxy::new("http://127.0.0.1:1/");
    let err = proxy.generate("x").await.unwrap_err();
    assert!(matches!(err, AiClientError::Request(_)));
    assert_eq!(err.user_message(), AI_FALLBACK_MESSAGE);
}
