//! Minimal data-binding renderer.
//!
//! Interpolates `{{ variable }}` bindings in a component snippet from its
//! state map, HTML-escaping every bound value. Intentionally a stub
//! collaborator rather than a component engine: no nesting, no
//! conditionals, no child components.

use async_trait::async_trait;

use crate::template::escape_html;

use super::{ComponentSpec, FragmentRenderer, RenderError, RenderResult};

#[derive(Debug, Clone, Default)]
pub struct DataBindRenderer;

impl DataBindRenderer {
    pub fn new() -> Self {
        Self
    }

    fn interpolate(component: &ComponentSpec) -> RenderResult<String> {
        let mut out = String::with_capacity(component.template.len());
        let mut rest = component.template.as_str();

        while let Some(idx) = rest.find("{{") {
            out.push_str(&rest[..idx]);
            let after = &rest[idx + 2..];

            let Some(end) = after.find("}}") else {
                return Err(RenderError::MalformedComponent(
                    "unterminated binding marker".to_string(),
                ));
            };

            let name = after[..end].trim();
            if name.is_empty() {
                return Err(RenderError::MalformedComponent(
                    "empty binding name".to_string(),
                ));
            }

            let value = component
                .state
                .get(name)
                .ok_or_else(|| RenderError::MissingBinding(name.to_string()))?;
            out.push_str(&escape_html(value));

            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

#[async_trait]
impl FragmentRenderer for DataBindRenderer {
    async fn render(&self, component: &ComponentSpec) -> RenderResult<String> {
        Self::interpolate(component)
    }
}
