//! Page-serving endpoint.

use std::time::Instant;

use axum::{extract::State, http::Uri, response::Html};

use crate::error::Result;
use crate::metrics::PageMetrics;
use crate::page::PageRequest;
use crate::server::AppState;

/// GET fallback - assemble and serve the page for any path
#[tracing::instrument(name = "http.render_page", skip(state, uri), fields(path = %uri.path()))]
pub async fn render_page(State(state): State<AppState>, uri: Uri) -> Result<Html<String>> {
    let request = PageRequest::new(uri.path());
    let started = Instant::now();

    let result = state.pages.render_page(&request).await;
    PageMetrics::observe_page_latency(started.elapsed().as_secs_f64());

    match result {
        Ok(document) => {
            PageMetrics::record_rendered(document.len());
            Ok(Html(document.into_string()))
        }
        Err(e) => {
            PageMetrics::record_failure(e.kind());
            Err(e.into())
        }
    }
}
