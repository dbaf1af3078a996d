//! Page rendering pipeline.
//!
//! `PageService` composes the injected fragment renderer with the shared
//! document shell: per request it builds the component description and the
//! substitution context, obtains the body fragment upstream, and assembles
//! the final document. Collaborators are passed-in handles, never globals,
//! so concurrent requests share nothing mutable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{ComponentConfig, SiteConfig};
use crate::metrics::PageMetrics;
use crate::renderer::{ComponentSpec, FragmentRenderer, RenderError};
use crate::template::{RenderContext, RenderedDocument, Template, TemplateError};

/// Page pipeline error.
///
/// Upstream renderer failures pass through unchanged; assembly failures
/// carry the template taxonomy. Callers map either kind to a generic
/// server-error response.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Upstream(#[from] RenderError),

    #[error(transparent)]
    Assembly(#[from] TemplateError),
}

impl PageError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PageError::Upstream(_) => "upstream",
            PageError::Assembly(TemplateError::MissingPlaceholderValue(_)) => "missing_value",
            PageError::Assembly(TemplateError::MalformedTemplate(_)) => "malformed_template",
        }
    }
}

/// A single page request as seen by the pipeline.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Request id for correlation in logs and traces.
    pub request_id: Uuid,
    /// Request path, bound into the page component.
    pub path: String,
}

impl PageRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            path: path.into(),
        }
    }
}

/// Statistics for the page pipeline
#[derive(Debug, Default)]
pub struct PageStats {
    /// Pages successfully rendered
    pub pages_rendered: AtomicU64,
    /// Upstream renderer failures
    pub upstream_failures: AtomicU64,
    /// Document assembly failures
    pub assembly_failures: AtomicU64,
}

impl PageStats {
    pub fn snapshot(&self) -> PageStatsSnapshot {
        PageStatsSnapshot {
            pages_rendered: self.pages_rendered.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            assembly_failures: self.assembly_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of page pipeline statistics
#[derive(Debug, Clone, Serialize)]
pub struct PageStatsSnapshot {
    pub pages_rendered: u64,
    pub upstream_failures: u64,
    pub assembly_failures: u64,
}

/// Renders pages by combining the upstream fragment with the document shell.
pub struct PageService {
    shell: Arc<Template>,
    renderer: Arc<dyn FragmentRenderer>,
    site: SiteConfig,
    component: ComponentConfig,
    stats: PageStats,
}

impl PageService {
    pub fn new(
        shell: Arc<Template>,
        renderer: Arc<dyn FragmentRenderer>,
        site: SiteConfig,
        component: ComponentConfig,
    ) -> Self {
        Self {
            shell,
            renderer,
            site,
            component,
            stats: PageStats::default(),
        }
    }

    /// The shared document shell.
    pub fn shell(&self) -> &Template {
        &self.shell
    }

    pub fn stats(&self) -> PageStatsSnapshot {
        self.stats.snapshot()
    }

    /// Render the full document for one request.
    ///
    /// The component description and context are built fresh here; only the
    /// shell is shared across requests.
    #[tracing::instrument(
        name = "page.render",
        skip(self, request),
        fields(request_id = %request.request_id, path = %request.path)
    )]
    pub async fn render_page(
        &self,
        request: &PageRequest,
    ) -> Result<RenderedDocument, PageError> {
        let component = ComponentSpec::new(&self.component.snippet).bind("url", &request.path);

        let started = Instant::now();
        let fragment = match self.renderer.render(&component).await {
            Ok(fragment) => fragment,
            Err(e) => {
                self.stats.upstream_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(request_id = %request.request_id, error = %e, "Upstream renderer failed");
                return Err(PageError::Upstream(e));
            }
        };
        PageMetrics::observe_fragment_latency(started.elapsed().as_secs_f64());

        let context = RenderContext::new()
            .with("title", &self.site.title)
            .with("meta", &self.site.meta)
            .with("url", &request.path);

        match self.shell.assemble(&fragment, &context) {
            Ok(document) => {
                self.stats.pages_rendered.fetch_add(1, Ordering::Relaxed);
                Ok(document)
            }
            Err(e) => {
                self.stats.assembly_failures.fetch_add(1, Ordering::Relaxed);
                Err(PageError::Assembly(e))
            }
        }
    }
}
