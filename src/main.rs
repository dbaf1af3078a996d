use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;

use ssr_render_gateway::config::Settings;
use ssr_render_gateway::server::{create_app, AppState};
use ssr_render_gateway::telemetry;
use ssr_render_gateway::template;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing; the guard must live until shutdown
    let _telemetry_guard = telemetry::init_telemetry(&settings.otel)?;
    tracing::info!("Configuration loaded");

    // Compile the document shell once; it is shared read-only afterwards,
    // while the page component and context are rebuilt per request
    let shell = template::load_shell(&settings.template)?;

    // Create application state
    let state = AppState::new(settings.clone(), shell);
    tracing::info!("Application state initialized");

    // Create Axum app
    let app = create_app(state);

    // Start server
    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
