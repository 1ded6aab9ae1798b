//! Template API: REST CRUD over a single `Template` resource.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{ApiError, ConfigError, ServiceError, StoreError};
pub use model::{CreateTemplate, ListTemplates, Template, TemplateChanges};
pub use routes::{app, common_routes, template_routes};
pub use service::TemplateService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_template_table, MemoryTemplateStore, PgTemplateStore, TemplateStore};
