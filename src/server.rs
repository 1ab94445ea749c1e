//! HTTP server initialization and runtime setup.
//!
//! Builds the page source and resolver, then runs the Axum server until a
//! shutdown signal arrives.

use crate::application::services::LinkResolver;
use crate::config::Config;
use crate::infrastructure::build_page_source;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Page source for the configured backend
/// - Link resolver
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The page source cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let source = build_page_source(
        config.fetch_backend,
        &config.user_agent,
        config.fetch_timeout(),
    )?;
    tracing::info!("Page source: {}", source.name());

    let resolver = LinkResolver::new(source, config.target_template()?);
    let state = AppState::new(resolver);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
