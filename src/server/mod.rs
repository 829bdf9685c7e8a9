//! HTTP server module for the pull, push and producer endpoints.

pub mod events;
pub mod routes;
pub mod state;
pub mod ws;

use crate::error::{RelayError, RelayResult};
use crate::server::events::events_handler;
use crate::server::routes::{health, text};
use crate::server::state::AppState;
use crate::server::ws::ws_handler;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};

/// Builds the router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS layer for browser viewers on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/text", get(text::get_text).post(text::post_text))
        .route("/events", get(events_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

/// Runs the axum server until `shutdown` flips to `true`.
pub async fn run_server(
    addr: SocketAddr,
    state: Arc<AppState>,
    mut shutdown: watch::Receiver<bool>,
) -> RelayResult<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| RelayError::Bind { addr, source })?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
            tracing::info!("HTTP server shutting down");
        })
        .await
        .map_err(RelayError::Serve)
}
