//! Template CRUD routes under `/template`. A trailing slash matches the same handlers.
//! Unsupported methods on a known path fall through to the same 404 as unknown paths.

use crate::handlers::{create_template, delete_template, get_template, list_templates, not_found, update_template};
use crate::middleware::{validate_request, ValidationRules};
use crate::schema::{create_template_body, template_id_params, update_template_body};
use crate::state::AppState;
use axum::{handler::Handler, middleware::from_fn_with_state, routing::get, Router};

pub const TEMPLATE_BASE: &str = "/template";

pub fn template_routes(state: AppState, body_limit: usize) -> Router {
    let create_rules = ValidationRules::new()
        .body(create_template_body())
        .body_limit(body_limit);
    let update_rules = ValidationRules::new()
        .params(template_id_params())
        .body(update_template_body())
        .body_limit(body_limit);

    let collection = get(list_templates)
        .post(create_template.layer(from_fn_with_state(create_rules, validate_request)))
        .fallback(not_found);
    let item = get(get_template)
        .put(update_template.layer(from_fn_with_state(update_rules, validate_request)))
        .delete(delete_template)
        .fallback(not_found);

    Router::new()
        .route(TEMPLATE_BASE, collection.clone())
        .route(&format!("{}/", TEMPLATE_BASE), collection)
        .route(&format!("{}/:id", TEMPLATE_BASE), item.clone())
        .route(&format!("{}/:id/", TEMPLATE_BASE), item)
        .with_state(state)
}
