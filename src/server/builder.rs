//! ServerBuilder for fluent API to build the HTTP server

use super::handlers::AppState;
use super::router::{build_proxy_routes, health_routes};
use crate::config::ProxyConfig;
use crate::proxy::ProxyService;
use crate::upstream::{CatalogClient, HttpCatalogClient};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating the proxy server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new(ProxyConfig::default_config())
///     .build()?;
///
/// // Or against a different upstream client
/// let app = ServerBuilder::new(config)
///     .with_client(MyCatalogClient::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ProxyConfig,
    client: Option<Arc<dyn CatalogClient>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder from configuration
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Set the upstream client
    ///
    /// Defaults to an [`HttpCatalogClient`] built from `config.upstream`.
    pub fn with_client(mut self, client: impl CatalogClient + 'static) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Build the transport-agnostic request pipeline
    pub fn build_service(mut self) -> Result<ProxyService> {
        let client = match self.client.take() {
            Some(client) => client,
            None => Arc::new(HttpCatalogClient::new(&self.config.upstream)?),
        };

        Ok(ProxyService::new(Arc::new(self.config), client))
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health check routes
    /// - The proxy routes
    /// - A request tracing layer
    pub fn build(self) -> Result<Router> {
        let state = AppState {
            service: self.build_service()?,
        };

        Ok(health_routes()
            .merge(build_proxy_routes(state))
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new(config)
    ///     .serve("0.0.0.0:8080").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
