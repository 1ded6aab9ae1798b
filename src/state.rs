//! Shared application state for all routes.

use crate::service::TemplateService;
use crate::store::TemplateStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub templates: TemplateService,
}

impl AppState {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self {
            templates: TemplateService::new(store),
        }
    }
}
