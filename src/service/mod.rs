//! TemplateService: the only caller of the template store.

mod template;
pub use template::TemplateService;
