//! HTTP server bootstrap

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::{Config, ServerState};

/// HTTP server wrapper
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Build the full application router
    pub fn router(state: ServerState) -> Router {
        Router::new()
            .merge(api::health::router())
            .merge(api::quotes::router())
            .merge(api::transactions::router())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind and serve until shutdown
    pub async fn run(self) -> anyhow::Result<()> {
        let app = Self::router(self.state);
        let addr = format!("0.0.0.0:{}", self.config.http_port);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("🚀 Starting HTTP server on {}", addr);

        axum::serve(listener, app).await?;
        Ok(())
    }
}
