//! WebSocket handler for push-mode viewers.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::server::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handles an individual WebSocket connection.
///
/// Each publish becomes one text frame holding the full current text.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscription = state.relay.subscribe_guarded();
    let id = subscription.id();
    tracing::debug!(subscriber = %id, "WebSocket connection opened");

    let mut send_task = tokio::spawn(async move {
        while let Some(text) = subscription.recv().await {
            if sender.send(Message::Text(text.to_string())).await.is_err() {
                break;
            }
        }
    });

    // Incoming frames are ignored apart from close
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    // Whichever side ends first takes the other down; aborting the sender
    // drops the subscription.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::debug!(subscriber = %id, "WebSocket connection closed");
}
