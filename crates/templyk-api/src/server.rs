//! Router assembly and the API server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use templyk_core::Config;

use crate::error::Result;
use crate::routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration.
    pub config: Arc<Config>,
}

/// Build the full application router for the given configuration.
pub fn app(config: Config) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };
    Router::new()
        .merge(routes::health::router())
        .merge(routes::templates::router())
        .merge(routes::users::router())
        .with_state(state)
}

/// Templyk API server.
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Bind the listener and serve requests until shutdown.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(templyk_core::Error::from)?;
        tracing::info!("templyk API listening on {addr} (mode: {})", self.config.mode);
        axum::serve(listener, app(self.config))
            .await
            .map_err(templyk_core::Error::from)?;
        Ok(())
    }
}
