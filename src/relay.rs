//! The text relay service.
//!
//! Owns the current text and the subscriber hub. Every handler receives the
//! same `Arc<TextRelay>`; nothing about the relay lives in process globals.

use crate::hub::{Subscriber, SubscriberHub, SubscriberId, SubscriptionGuard};
use crate::store::{text_len, TextStore, WriteMode};
use crate::viewer::HandoffSender;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct TextRelay {
    store: TextStore,
    hub: Arc<SubscriberHub>,
    handoff: Option<HandoffSender>,
}

impl TextRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a relay that also forwards every write to a display queue.
    pub fn with_handoff(handoff: HandoffSender) -> Self {
        Self {
            handoff: Some(handoff),
            ..Self::default()
        }
    }

    /// Applies a producer write and broadcasts the resulting full text.
    ///
    /// The publish happens while the store is still locked, so subscribers
    /// observe values in write order. Returns the chunk length.
    pub fn write(&self, mode: WriteMode, text: &str) -> usize {
        let (length, (total, report)) = self.store.apply(mode, text, |full| {
            // Queued under the store lock so the display replays writes in order
            if let Some(handoff) = &self.handoff {
                if handoff.send((mode, text.to_owned())).is_err() {
                    tracing::warn!("Display queue closed, dropping update");
                }
            }
            (text_len(full), self.hub.publish(full))
        });

        tracing::debug!(
            %mode,
            length,
            total,
            delivered = report.delivered,
            dropped = report.dropped,
            "Text updated"
        );
        length
    }

    /// Replaces the text. See [`TextRelay::write`].
    pub fn set(&self, text: &str) -> usize {
        self.write(WriteMode::Set, text)
    }

    /// Appends to the text. See [`TextRelay::write`].
    pub fn append(&self, text: &str) -> usize {
        self.write(WriteMode::Append, text)
    }

    /// Current text, for pull-mode readers.
    pub fn current(&self) -> String {
        self.store.get()
    }

    /// Total length of the current text.
    pub fn current_len(&self) -> usize {
        self.store.len()
    }

    pub fn subscribe(&self) -> Subscriber {
        self.hub.subscribe()
    }

    /// Subscription released automatically when the guard is dropped.
    pub fn subscribe_guarded(&self) -> SubscriptionGuard {
        self.hub.subscribe_guarded()
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.hub.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    #[test]
    fn test_set_then_set_replaces() {
        let relay = TextRelay::new();
        relay.set("hello");
        relay.set("world");
        assert_eq!(relay.current(), "world");
    }

    #[test]
    fn test_set_then_append_concatenates() {
        let relay = TextRelay::new();
        relay.set("ab");
        assert_eq!(relay.append("cd"), 2);
        assert_eq!(relay.current(), "abcd");
        assert_eq!(relay.current_len(), 4);
    }

    #[tokio::test]
    async fn test_write_broadcasts_full_value_not_delta() {
        let relay = TextRelay::new();
        relay.set("ab");

        let mut sub = relay.subscribe();
        relay.append("cd");

        let received = timeout(Duration::from_secs(1), sub.recv()).await.unwrap();
        assert_eq!(received.as_deref(), Some("abcd"));
        assert_eq!(received.as_deref(), Some(relay.current().as_str()));
    }

    #[test]
    fn test_write_forwards_chunk_to_handoff() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let relay = TextRelay::with_handoff(tx);

        relay.set("ab");
        relay.append("cd");

        assert_eq!(rx.try_recv().unwrap(), (WriteMode::Set, "ab".to_string()));
        assert_eq!(rx.try_recv().unwrap(), (WriteMode::Append, "cd".to_string()));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_write_survives_closed_handoff() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let relay = TextRelay::with_handoff(tx);

        assert_eq!(relay.set("still works"), 11);
        assert_eq!(relay.current(), "still works");
    }

    #[test]
    fn test_dead_subscriber_does_not_block_write() {
        let relay = TextRelay::new();
        let dead = relay.subscribe();
        drop(dead);

        relay.set("x");
        assert_eq!(relay.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_twice_is_harmless() {
        let relay = TextRelay::new();
        let sub = relay.subscribe();

        assert!(relay.unsubscribe(sub.id()));
        assert!(!relay.unsubscribe(sub.id()));

        assert_eq!(relay.set("x"), 1);
        assert_eq!(relay.subscriber_count(), 0);
    }
}
