//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with one registration per relay rule
//! - Wire up middleware (CORS stamping, request tracing)
//! - Bind server to listener and serve with graceful shutdown

use axum::{
    middleware,
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::middleware::cors_middleware;
use crate::relay::{handlers, RelayState};

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let state = RelayState::new(config);
        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Rule precedence is encoded in route specificity: the named routes
    /// claim their paths, the fallback is the catch-all passthrough. The
    /// bare and trailing-slash stream routes exist because the wildcard
    /// only matches a non-empty remainder.
    fn build_router(state: RelayState) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/playlist/{filename}", post(handlers::playlist))
            .route("/stream", any(handlers::stream))
            .route("/stream/", any(handlers::stream))
            .route("/stream/{*path}", any(handlers::stream))
            .route("/iframe/{id}", get(handlers::iframe))
            .route(
                "/jeyna-playlist/{filename}",
                post(handlers::playlist_initiation),
            )
            .fallback(handlers::passthrough)
            .with_state(state)
            .layer(middleware::from_fn(cors_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
