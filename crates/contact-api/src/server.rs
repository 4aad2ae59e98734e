//! Server lifecycle
//!
//! The store adapter is built once here and injected into the router state.
//! It connects on the first submission, not at startup, so the server comes
//! up even while the database is unreachable.

use contact_core::ContactService;
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::handler::{create_router, AppState};
use crate::telemetry::ContactMetrics;

/// Build the router for a configuration without binding a socket
pub fn build_app(config: &ServiceConfig) -> anyhow::Result<axum::Router> {
    let store = config.store.build();
    let service = ContactService::new(store);
    let metrics = Arc::new(ContactMetrics::new()?);
    let state = AppState::new(service, metrics, config.max_body_size);
    Ok(create_router(state, config.cors_origin()?))
}

/// Bind and serve until Ctrl-C or SIGTERM
pub async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = build_app(&config)?;

    tracing::info!(
        address = %addr,
        backend = %config.store.backend,
        version = crate::SERVICE_VERSION,
        "Starting contact service"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Contact service shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
