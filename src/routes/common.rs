//! Common routes: health, readiness, version.

use crate::handlers::{health, not_found, ready, version};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/ready", get(ready).fallback(not_found))
        .route("/version", get(version).fallback(not_found))
        .with_state(state)
}
