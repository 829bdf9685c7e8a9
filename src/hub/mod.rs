//! Subscriber broadcast hub.
//!
//! Fans every published value out to all live subscribers without ever
//! waiting on any one of them. Each subscriber owns a single-value slot;
//! publishing overwrites whatever is unread, so slow viewers only ever see
//! the latest text. A slot whose receiver is gone is treated as dead and
//! removed during the publish that discovers it.

pub mod subscriber;

pub use subscriber::*;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Outcome of one publish pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishReport {
    /// Subscribers whose slot now holds the value.
    pub delivered: usize,
    /// Dead subscribers removed during this pass.
    pub dropped: usize,
}

/// The set of live subscribers.
///
/// Membership changes and publish iteration share one lock, so a publish
/// always sees a consistent snapshot and nothing is delivered after removal.
#[derive(Debug, Default)]
pub struct SubscriberHub {
    slots: Mutex<HashMap<SubscriberId, Slot>>,
    next_id: AtomicU64,
}

impl SubscriberHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber with an empty slot.
    ///
    /// Values published before this call are not delivered to it.
    pub fn subscribe(&self) -> Subscriber {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = watch::channel(None);

        let live = {
            let mut slots = self.slots();
            slots.insert(id, tx);
            slots.len()
        };

        tracing::debug!(subscriber = %id, live, "Subscriber attached");
        Subscriber::new(id, rx)
    }

    /// Subscribes and ties the subscription to the returned guard.
    pub fn subscribe_guarded(self: &Arc<Self>) -> SubscriptionGuard {
        SubscriptionGuard::new(Arc::clone(self))
    }

    /// Removes a subscriber.
    ///
    /// Returns `true` if it was live. Removing an unknown or already removed
    /// id is a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let removed = self.slots().remove(&id).is_some();
        if removed {
            tracing::debug!(subscriber = %id, "Subscriber detached");
        }
        removed
    }

    /// Delivers `text` to every live subscriber.
    ///
    /// Never blocks on a subscriber. Slots that can no longer accept a value
    /// are removed in the same pass.
    pub fn publish(&self, text: &str) -> PublishReport {
        let text: Arc<str> = Arc::from(text);
        let mut slots = self.slots();
        let before = slots.len();

        slots.retain(|id, slot| match slot.send(Some(Arc::clone(&text))) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(subscriber = %id, "Dropping dead subscriber");
                false
            }
        });

        PublishReport {
            delivered: slots.len(),
            dropped: before - slots.len(),
        }
    }

    /// Number of live subscribers.
    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    pub fn contains(&self, id: SubscriberId) -> bool {
        self.slots().contains_key(&id)
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<SubscriberId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
