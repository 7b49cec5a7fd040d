//! STAXXIT Server - HTTP session coordinator
//!
//! This crate provides the web backend:
//! - Room lifecycle (create, join, leave, teardown)
//! - Move submission routed through the rules engine
//! - Version-based long polling for state updates
//! - Static file serving for the client

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

mod routes;
mod state;

pub use state::{Room, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: "static".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board geometry and outer-ring colors
        .route("/api/board", get(routes::board::get_board))
        // Room API
        .route("/api/room", post(routes::room::create_room))
        .route("/api/room/{id}/join", post(routes::room::join_room))
        .route("/api/room/{id}/state", get(routes::room::room_state))
        .route("/api/room/{id}/poll", get(routes::room::poll_room))
        .route("/api/room/{id}/move", post(routes::room::make_move))
        .route("/api/room/{id}/leave", post(routes::room::leave_room))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new());
    let router = create_router(&config, state);

    tracing::info!("STAXXIT server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
