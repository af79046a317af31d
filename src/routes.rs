//! HTTP routes for the simplifier service.

use crate::domain::model::{SimplificationRequest, SimplificationResult};
use crate::server::AppState;
use crate::utils::error::SimplifyError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

type AppStateArc = Arc<AppState>;

/// Uniform failure envelope. `error` is always human-readable; `details`
/// carries a sanitized cause when one exists.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub fn summarize_routes() -> Router<AppStateArc> {
    Router::new().route(
        "/api/summarize",
        post(summarize).fallback(method_not_allowed),
    )
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

async fn summarize(
    State(state): State<AppStateArc>,
    payload: Result<Json<SimplificationRequest>, JsonRejection>,
) -> Result<Json<SimplificationResult>, (StatusCode, Json<ErrorBody>)> {
    // Body must deserialize before anything upstream happens. Bodies
    // over the transport limit surface here as a 413 rejection.
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        let (status, error) = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
            }
            _ => (StatusCode::BAD_REQUEST, "Missing 'text' (string)"),
        };
        (
            status,
            Json(ErrorBody {
                error: error.to_string(),
                details: Some(rejection.body_text()),
            }),
        )
    })?;

    match state.engine.simplify(&request.text).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            // Full detail server-side only; the envelope gets the sanitized form.
            error!("Summarization failed: {:?}", e);
            Err(error_response(&e))
        }
    }
}

fn error_response(err: &SimplifyError) -> (StatusCode, Json<ErrorBody>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorBody {
            error: err.user_message(),
            details: err.details(),
        }),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".to_string(),
            details: None,
        }),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
