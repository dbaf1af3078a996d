//! Health check and statistics endpoints.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::page::PageStatsSnapshot;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub shell: ShellHealthResponse,
    pub pages: PageHealthResponse,
}

#[derive(Debug, Serialize)]
pub struct ShellHealthResponse {
    pub placeholders: usize,
    pub mandatory: Vec<String>,
    pub has_body_outlet: bool,
    pub source_bytes: usize,
}

#[derive(Debug, Serialize)]
pub struct PageHealthResponse {
    pub rendered: u64,
    pub failed: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub pages: PageStatsSnapshot,
    pub generated_at: DateTime<Utc>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let shell = state.pages.shell();
    let stats = state.pages.stats();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        shell: ShellHealthResponse {
            placeholders: shell.placeholder_count(),
            mandatory: shell
                .mandatory_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            has_body_outlet: shell.has_body_outlet(),
            source_bytes: shell.source_bytes(),
        },
        pages: PageHealthResponse {
            rendered: stats.pages_rendered,
            failed: stats.upstream_failures + stats.assembly_failures,
        },
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        pages: state.pages.stats(),
        generated_at: Utc::now(),
    })
}
