//! Health, readiness, version, and the not-found fallback.

use crate::error::ApiError;
use crate::response::{message_body, MessageBody};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

pub async fn health() -> (StatusCode, Json<MessageBody>) {
    (StatusCode::OK, Json(message_body("Server is healthy")))
}

/// 200 when the template store answers, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> Result<Json<MessageBody>, ApiError> {
    state.templates.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "readiness check failed");
        ApiError::Unavailable("Store unavailable")
    })?;
    Ok(Json(message_body("Server is ready")))
}

pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(message_body("Not Found")))
}
