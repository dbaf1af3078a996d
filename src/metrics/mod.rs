//! Prometheus metrics for the render gateway.
//!
//! This module provides:
//! - Page metrics (rendered, failures by kind)
//! - Latency metrics (upstream fragment rendering, end-to-end page rendering)
//! - Output size metrics (assembled document bytes)

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "ssr";

lazy_static! {
    // ============================================================================
    // Page Metrics
    // ============================================================================

    /// Total pages successfully rendered
    pub static ref PAGES_RENDERED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_pages_rendered_total", METRIC_PREFIX),
        "Total pages successfully rendered"
    ).unwrap();

    /// Total page rendering failures by kind
    pub static ref PAGE_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_page_failures_total", METRIC_PREFIX),
        "Total page rendering failures",
        &["kind"]
    ).unwrap();

    // ============================================================================
    // Latency Metrics
    // ============================================================================

    /// End-to-end page rendering latency
    pub static ref PAGE_RENDER_LATENCY: Histogram = register_histogram!(
        format!("{}_page_render_latency_seconds", METRIC_PREFIX),
        "End-to-end page rendering latency in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    ).unwrap();

    /// Upstream fragment rendering latency
    pub static ref FRAGMENT_RENDER_LATENCY: Histogram = register_histogram!(
        format!("{}_fragment_render_latency_seconds", METRIC_PREFIX),
        "Upstream fragment rendering latency in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    ).unwrap();

    // ============================================================================
    // Output Metrics
    // ============================================================================

    /// Assembled document size in bytes
    pub static ref DOCUMENT_BYTES: Histogram = register_histogram!(
        format!("{}_document_bytes", METRIC_PREFIX),
        "Assembled document size in bytes",
        vec![256.0, 1024.0, 4096.0, 16384.0, 65536.0, 262144.0]
    ).unwrap();
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording page pipeline metrics
pub struct PageMetrics;

impl PageMetrics {
    /// Record a successfully rendered page and its output size
    pub fn record_rendered(document_bytes: usize) {
        PAGES_RENDERED_TOTAL.inc();
        DOCUMENT_BYTES.observe(document_bytes as f64);
    }

    /// Record a page failure by kind
    pub fn record_failure(kind: &str) {
        PAGE_FAILURES_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Observe end-to-end page rendering latency
    pub fn observe_page_latency(seconds: f64) {
        PAGE_RENDER_LATENCY.observe(seconds);
    }

    /// Observe upstream fragment rendering latency
    pub fn observe_fragment_latency(seconds: f64) {
        FRAGMENT_RENDER_LATENCY.observe(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_metrics() {
        // Initialize some metrics first (lazy_static requires first access)
        PAGES_RENDERED_TOTAL.inc();

        // Verify encoding doesn't panic and contains expected prefix
        let result = encode_metrics();
        assert!(result.is_ok());
        let output = result.unwrap();
        assert!(output.contains("ssr_pages_rendered_total"));
    }

    #[test]
    fn test_page_metrics() {
        PageMetrics::record_rendered(2048);
        PageMetrics::record_failure("upstream");
        PageMetrics::record_failure("missing_value");
        PageMetrics::observe_page_latency(0.002);
        PageMetrics::observe_fragment_latency(0.001);
        // Just verify no panics
    }
}
