//! Server configuration and startup.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::state::AppState;

/// Bind configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// The REST server: routes, middleware and bind loop.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Builds the router; split out so tests can drive it without a
    /// socket.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/tokens", get(handlers::list_tokens))
            .route("/simulate", post(handlers::simulate))
            .route("/surface", post(handlers::surface))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Binds and serves until the process is stopped.
    ///
    /// # Errors
    /// Returns an error when the address cannot be bound.
    pub async fn run(self) -> std::io::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(%addr, "API server listening");

        axum::serve(listener, Self::router(self.state)).await
    }
}
