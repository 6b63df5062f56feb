//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the two AI proxy endpoints plus a health probe under a single Axum
//! router. Each endpoint is mounted at its bare path and under `/api` so a
//! browser client served from the same origin can use either form.

pub mod ai;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generate", post(ai::generate))
        .route("/edit", post(ai::edit))
        .route("/api/generate", post(ai::generate))
        .route("/api/edit", post(ai::edit))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
