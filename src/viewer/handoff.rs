//! Hand-off queue between the producer endpoint and the display.

use crate::store::WriteMode;
use tokio::sync::mpsc;

/// One producer write, as queued for the display.
pub type Handoff = (WriteMode, String);

pub type HandoffSender = mpsc::UnboundedSender<Handoff>;
pub type HandoffReceiver = mpsc::UnboundedReceiver<Handoff>;

/// Creates the queue. The relay keeps the sender, the refresh task the receiver.
pub fn handoff_queue() -> (HandoffSender, HandoffReceiver) {
    mpsc::unbounded_channel()
}
