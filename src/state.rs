//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds only the completion-service handle: the proxy endpoints keep
//! no per-request or per-user state.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::llm::config::DEFAULT_LLM_MAX_TOKENS;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the client handle is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no credential was configured; AI endpoints then fail fast.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Output token cap forwarded with every completion request.
    pub max_tokens: u32,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None, DEFAULT_LLM_MAX_TOKENS)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_has_no_llm() {
        let state = AppState::default();
        assert!(state.llm.is_none());
        assert_eq!(state.max_tokens, DEFAULT_LLM_MAX_TOKENS);
    }

    #[test]
    fn clone_shares_llm_handle() {
        let llm: Arc<dyn LlmChat> = Arc::new(test_helpers::MockLlm::replying("{}"));
        let state = test_helpers::test_app_state_with_llm(llm.clone());
        let cloned = state.clone();
        assert_eq!(Arc::strong_count(&llm), 3);
        assert!(cloned.llm.is_some());
    }
}
