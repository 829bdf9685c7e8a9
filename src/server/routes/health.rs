//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::server::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Live push subscribers.
    pub subscribers: usize,
    /// Length of the current text.
    pub length: usize,
    pub timestamp: String,
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        subscribers: state.relay.subscriber_count(),
        length: state.relay.current_len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
