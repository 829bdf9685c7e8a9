//! Shared application state for the HTTP server.

use crate::relay::TextRelay;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The relay every endpoint reads from or writes to.
    pub relay: Arc<TextRelay>,
    /// Interval between keep-alive comments on `/events`.
    pub keep_alive: Duration,
}

impl AppState {
    /// Creates new app state around the given relay.
    pub fn new(relay: Arc<TextRelay>, keep_alive: Duration) -> Self {
        Self { relay, keep_alive }
    }
}
