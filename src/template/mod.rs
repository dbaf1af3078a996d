//! Document shell template system.
//!
//! This module provides:
//! - Shell parsing with `{{name}}` (HTML-escaped) and `{{{name}}}` (raw)
//!   placeholder markers
//! - A mandatory/optional requirement policy per placeholder
//! - Single-pass assembly of a pre-rendered body fragment and per-request
//!   context into the final document
//!
//! # Example
//!
//! ```ignore
//! let shell = TemplateBuilder::new("<title>{{title}}</title><main>{{body}}</main>")
//!     .mandatory("title")
//!     .build()?;
//!
//! let context = RenderContext::new().with("title", "Home");
//! let document = shell.assemble("<div>Hello</div>", &context)?;
//! ```

mod assemble;
mod loader;
mod parse;
mod types;

pub use assemble::escape_html;
pub use loader::{load_shell, ShellLoadError};
pub use parse::TemplateBuilder;
pub use types::{
    RenderContext, RenderedDocument, Requirement, Template, TemplateError, TemplateResult,
    BODY_OUTLET,
};
