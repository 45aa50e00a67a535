//! Server execution logic.

use std::{io::ErrorKind, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

use super::{
    handler::{
        create_document, fetch_document, get_room_detail, health_check, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Collaborative document server
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState::new(registry, store, message_pusher, Arc::new(SystemClock)));
/// let server = Server::new(state, ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl Server {
    pub fn new(state: Arc<AppState>, config: ServerConfig) -> Self {
        Self { state, config }
    }

    /// Build the router with every endpoint, CORS and request tracing
    ///
    /// # Errors
    ///
    /// Returns an error if the configured allowed origin is not a valid header value.
    pub fn router(&self) -> Result<Router, header::InvalidHeaderValue> {
        let allowed_origin: HeaderValue = self.config.allowed_origin.parse()?;
        let cors = CorsLayer::new()
            .allow_origin(allowed_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);

        Ok(Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/create", post(create_document))
            .route("/doc/{id}", get(fetch_document))
            .route("/api/health", get(health_check))
            .route("/api/rooms/{document_id}", get(get_room_detail))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone()))
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if no port could be bound or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router()?;

        let listener = bind_with_fallback(
            &self.config.host,
            self.config.port,
            self.config.port_attempts,
        )
        .await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Document server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Bind to `host:port`, moving on to the next port while the address is in use
///
/// At most `attempts` ports are tried (at least one).
pub async fn bind_with_fallback(
    host: &str,
    port: u16,
    attempts: u16,
) -> std::io::Result<TcpListener> {
    let mut port = port;
    let mut remaining = attempts.max(1);

    loop {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == ErrorKind::AddrInUse && remaining > 1 && port < u16::MAX => {
                tracing::warn!("Port {} in use, trying {}", port, port + 1);
                port += 1;
                remaining -= 1;
            }
            Err(e) => return Err(e),
        }
    }
}
