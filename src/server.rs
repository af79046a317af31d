//! HTTP server wiring for the simplifier service.

use crate::core::engine::SimplifierEngine;
use crate::domain::ports::ConfigProvider;
use crate::routes;
use anyhow::Result;
use axum::http::{header, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers. The engine owns the
/// injected completion client; nothing here is mutable.
pub struct AppState {
    pub engine: SimplifierEngine,
}

impl AppState {
    pub fn new(engine: SimplifierEngine) -> Self {
        Self { engine }
    }
}

pub fn build_router(state: AppState, body_limit: usize) -> Router {
    // Browser clients call this cross-origin; pre-flight OPTIONS is
    // answered by the CORS layer with these permissive headers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::summarize_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(body_limit))
}

/// Transport-level request-body ceiling sized from the character limit:
/// worst-case UTF-8 plus JSON escaping overhead.
pub fn body_limit_bytes(max_input_chars: usize) -> usize {
    max_input_chars.saturating_mul(4) + 1024
}

/// Run the HTTP server until shutdown.
pub async fn run<C: ConfigProvider>(config: &C, state: AppState) -> Result<()> {
    let app = build_router(state, body_limit_bytes(config.max_input_chars()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on http://{}", config.bind_addr());

    axum::serve(listener, app).await?;
    Ok(())
}
