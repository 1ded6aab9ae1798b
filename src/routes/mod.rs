//! Route tables and the assembled application.

mod common;
mod template;

pub use common::common_routes;
pub use template::{template_routes, TEMPLATE_BASE};

use crate::config::AppConfig;
use crate::handlers::not_found;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Full HTTP surface: `/health`, `/ready`, `/version`, `/template/...`, and a 404 fallback.
/// The trace layer emits at DEBUG; see [`DEFAULT_LOG_FILTER`](crate::config::DEFAULT_LOG_FILTER).
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(template_routes(state, config.body_limit_bytes))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(config.body_limit_bytes)),
        )
}
