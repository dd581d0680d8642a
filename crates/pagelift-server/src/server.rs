// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main server implementation

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Deployment API server
pub struct Server {
    config: ServerConfig,
    app: Router,
}

impl Server {
    /// Create a server wired to the real provider API
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self::with_state(config, state))
    }

    /// Construct a server from an already-built app state (used for custom
    /// collaborators)
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        let app = Self::build_app(state);
        Self { config, app }
    }

    /// Build the Axum application with routes and middleware
    fn build_app(state: AppState) -> Router {
        // The inbound API is meant to be called from browsers anywhere, so
        // CORS is wide open; the preflight OPTIONS on /deploy is answered by
        // the layer.
        let middleware_stack = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        Router::new()
            .route("/deploy", post(handlers::deploy::deploy))
            .route("/healthz", get(handlers::health::health_check))
            .route("/version", get(handlers::health::version))
            .layer(middleware_stack)
            .with_state(state)
    }

    /// The configured bind address
    pub fn bind_addr(&self) -> std::net::SocketAddr {
        self.config.bind_addr
    }

    /// Run the server until the process is stopped
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        info!("Listening for connections on {}", self.config.bind_addr);
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}
