//! Upstream fragment rendering collaborators.
//!
//! The gateway never renders component markup itself. Each request hands an
//! abstract component/state description to a [`FragmentRenderer`] and
//! injects whatever comes back into the document shell. Renderer failures
//! are their own error kind and pass through the page pipeline unchanged;
//! the gateway neither retries nor masks them.

mod databind;

pub use databind::DataBindRenderer;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Renderer-specific error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("No binding for component variable: {0}")]
    MissingBinding(String),

    #[error("Malformed component template: {0}")]
    MalformedComponent(String),

    #[error("Renderer failed: {0}")]
    Failed(String),
}

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Abstract description of the component to render for one request.
///
/// Built fresh per request, unlike the document shell it is injected into,
/// which lives for the whole process.
#[derive(Debug, Clone, Default)]
pub struct ComponentSpec {
    /// Snippet markup with `{{ variable }}` bindings.
    pub template: String,
    /// State values bound into the snippet.
    pub state: HashMap<String, String>,
}

impl ComponentSpec {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            state: HashMap::new(),
        }
    }

    /// Builder-style state binding.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.state.insert(name.into(), value.into());
        self
    }
}

/// Produces the pre-rendered body fragment for a page request.
#[async_trait]
pub trait FragmentRenderer: Send + Sync {
    async fn render(&self, component: &ComponentSpec) -> RenderResult<String>;
}
