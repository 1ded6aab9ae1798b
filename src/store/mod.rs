//! Persistence boundary for templates. Absence is `Ok(None)`; everything else is a [`StoreError`].

mod memory;
mod postgres;

pub use memory::MemoryTemplateStore;
pub use postgres::{ensure_database_exists, ensure_template_table, PgTemplateStore, TEMPLATE_TABLE};

use crate::error::StoreError;
use crate::model::{CreateTemplate, Template, TemplateChanges, TemplateQuery};
use async_trait::async_trait;

#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Persist a new template; the store assigns `id` and timestamps.
    async fn insert(&self, new: &CreateTemplate) -> Result<Template, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Template>, StoreError>;

    /// One page of templates, filtered on `name` and ordered per the query.
    async fn find_many(&self, query: &TemplateQuery) -> Result<Vec<Template>, StoreError>;

    /// Apply only the supplied fields. `None` if no template has this id.
    async fn update(&self, id: &str, changes: &TemplateChanges) -> Result<Option<Template>, StoreError>;

    /// Hard delete. Returns the removed row, `None` if no template has this id.
    async fn delete(&self, id: &str) -> Result<Option<Template>, StoreError>;

    /// Round-trip to the backend for readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
