//! Server-sent event stream for push-mode viewers.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{stream, Stream};
use serde_json::json;
use std::sync::Arc;

use crate::server::state::AppState;

/// GET /events - One event per publish, carrying the full current text.
///
/// The subscription lives inside the stream, so when the client goes away
/// and axum drops the body, the viewer is unsubscribed. A new viewer gets
/// no snapshot; it sees the next publish.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let guard = state.relay.subscribe_guarded();
    tracing::debug!(subscriber = %guard.id(), "Event stream opened");

    let events = stream::unfold(guard, |mut guard| async move {
        let text = guard.recv().await?;
        let event = Event::default().json_data(json!({ "text": &*text }));
        Some((event, guard))
    });

    Sse::new(events).keep_alive(KeepAlive::new().interval(state.keep_alive))
}
