//! Core types for the document shell and its placeholder model.

use std::collections::HashMap;

use thiserror::Error;

/// Reserved placeholder name marking where the rendered body fragment is injected.
pub const BODY_OUTLET: &str = "body";

/// Template-specific error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    #[error("Missing value for mandatory placeholder: {0}")]
    MissingPlaceholderValue(String),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Whether a placeholder must be resolvable at assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Assembly fails when no value is supplied.
    Mandatory,
    /// Resolves to the empty string when no value is supplied.
    Optional,
}

/// One compiled piece of a parsed shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Verbatim text between placeholders.
    Literal(String),
    /// A named placeholder. Raw placeholders skip HTML escaping.
    Placeholder { name: String, raw: bool },
}

/// A compiled document shell.
///
/// Compiled once from source text, immutable afterwards. Safe to share
/// behind `Arc` across concurrent assembly calls; `assemble` takes `&self`
/// and touches no shared mutable state.
#[derive(Debug, Clone)]
pub struct Template {
    pub(crate) segments: Vec<Segment>,
    pub(crate) requirements: HashMap<String, Requirement>,
    pub(crate) source_len: usize,
}

impl Template {
    /// Distinct placeholder names, in order of first appearance.
    pub fn placeholder_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder { name, .. } = segment {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Number of distinct placeholder names.
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_names().len()
    }

    /// Whether the shell contains the body outlet.
    pub fn has_body_outlet(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder { name, .. } if name == BODY_OUTLET))
    }

    /// Declared mandatory placeholder names, sorted.
    pub fn mandatory_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .requirements
            .iter()
            .filter(|(_, r)| **r == Requirement::Mandatory)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Size of the source text the shell was compiled from.
    pub fn source_bytes(&self) -> usize {
        self.source_len
    }

    /// Requirement for a placeholder name. Undeclared names are optional.
    pub fn requirement(&self, name: &str) -> Requirement {
        self.requirements
            .get(name)
            .copied()
            .unwrap_or(Requirement::Optional)
    }
}

/// Per-request substitution values for auxiliary placeholders.
///
/// Built fresh for every request and discarded once the document is
/// produced. An empty context is valid; optional placeholders then resolve
/// to their empty-string default.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    values: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The fully assembled output document.
///
/// Terminal text: it is handed to the transport layer as-is and never fed
/// back through the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RenderedDocument> for String {
    fn from(document: RenderedDocument) -> Self {
        document.0
    }
}
