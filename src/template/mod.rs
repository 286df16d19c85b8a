//! Placeholder context and rendering

pub mod context;
pub mod render;

pub use context::{TemplateContext, build_template_context};
pub use render::{render_json_template, render_template_string, substitute};
