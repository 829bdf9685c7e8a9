//! Subscriber handles for the broadcast hub.

use super::SubscriberHub;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Opaque identifier of one connected viewer. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub(crate) u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Sending half of a subscriber's delivery slot, owned by the hub.
pub(crate) type Slot = watch::Sender<Option<Arc<str>>>;

/// Receiving side of one subscriber's delivery slot.
///
/// The slot holds at most one unread value. A publish that lands before the
/// previous value was read replaces it.
#[derive(Debug)]
pub struct Subscriber {
    id: SubscriberId,
    rx: watch::Receiver<Option<Arc<str>>>,
}

impl Subscriber {
    pub(crate) fn new(id: SubscriberId, rx: watch::Receiver<Option<Arc<str>>>) -> Self {
        Self { id, rx }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next published value.
    ///
    /// Returns `None` once the subscriber has been removed from the hub.
    pub async fn recv(&mut self) -> Option<Arc<str>> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            if let Some(text) = self.rx.borrow_and_update().clone() {
                return Some(text);
            }
        }
    }

    /// Takes the pending value without waiting, if one is unread.
    pub fn try_recv(&mut self) -> Option<Arc<str>> {
        if !self.rx.has_changed().unwrap_or(false) {
            return None;
        }
        self.rx.borrow_and_update().clone()
    }
}

/// A subscription tied to the lifetime of a transport connection.
///
/// Dropping the guard unsubscribes from the hub exactly once, so a push
/// stream that is torn down on disconnect releases its slot immediately.
#[derive(Debug)]
pub struct SubscriptionGuard {
    hub: Arc<SubscriberHub>,
    subscriber: Subscriber,
}

impl SubscriptionGuard {
    pub fn new(hub: Arc<SubscriberHub>) -> Self {
        let subscriber = hub.subscribe();
        Self { hub, subscriber }
    }

    pub fn id(&self) -> SubscriberId {
        self.subscriber.id()
    }

    /// See [`Subscriber::recv`].
    pub async fn recv(&mut self) -> Option<Arc<str>> {
        self.subscriber.recv().await
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if self.hub.unsubscribe(self.subscriber.id()) {
            tracing::debug!(subscriber = %self.subscriber.id(), "Subscription released");
        }
    }
}
