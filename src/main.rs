mod config;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use llm::LlmChat;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file"),
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let server = config::ServerConfig::from_env().expect("invalid server config");

    // Initialize LLM client (non-fatal: AI features disabled if config missing).
    let (llm, max_tokens) = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            let max_tokens = client.max_tokens();
            (Some(Arc::new(client) as Arc<dyn LlmChat>), max_tokens)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, AI features disabled");
            (None, llm::config::DEFAULT_LLM_MAX_TOKENS)
        }
    };

    let state = state::AppState::new(llm, max_tokens);

    let app = routes::app(state);
    let addr = server.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "lottie-studio listening");
    axum::serve(listener, app).await.expect("server failed");
}
