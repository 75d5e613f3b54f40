//! # Inven!RA Server
//!
//! Runs the REST API over an in-memory store.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin invenira-server
//!
//! INVENIRA_ENV=production PORT=8080 cargo run --bin invenira-server
//! ```

use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing::info;

use invenira_core::config::InveniraConfig;
use invenira_core::database::InMemoryDbService;
use invenira_core::logging;
use invenira_core::provider_client::HttpClientFactory;
use invenira_core::registry::ProviderClientRegistry;
use invenira_core::services::IapService;
use invenira_core::web::{create_app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started = Instant::now();

    let config = InveniraConfig::load().context("Failed to load configuration")?;
    logging::init_structured_logging(&config);

    info!("🚀 Starting Inven!RA Server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        "   Build Mode: {}",
        if cfg!(debug_assertions) {
            "Debug"
        } else {
            "Release"
        }
    );
    info!("   Environment: {}", config.environment);

    let factory = HttpClientFactory::new(&config.provider_client)
        .context("Failed to create Activity Provider HTTP client")?;
    let registry = Arc::new(ProviderClientRegistry::new(Arc::new(factory)));
    let service = IapService::new(Arc::new(InMemoryDbService::new()), registry);

    let addr = config.web.socket_addr()?;
    let app = create_app(AppState::new(config.web.clone(), service));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        "🎉 Server listening on {} (started in {} ms)",
        listener.local_addr()?,
        started.elapsed().as_millis()
    );
    info!("   Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Inven!RA Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
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
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
