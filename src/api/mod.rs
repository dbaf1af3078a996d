//! API layer - HTTP endpoint handlers organized by domain.

mod health;
mod metrics;
mod pages;
mod routes;

// Re-export all handlers for use in server/app.rs
pub use health::{health, stats};
pub use metrics::prometheus_metrics;
pub use pages::render_page;
pub use routes::api_routes;
