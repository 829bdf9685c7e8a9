//! Text Relay
//!
//! A producer pushes text over HTTP; viewers observe the latest value either
//! by polling `GET /text` or by holding a push stream open on `/events` or
//! `/ws`. An optional terminal viewer shows the text in-process.

pub mod config;
pub mod error;
pub mod hub;
pub mod relay;
pub mod server;
pub mod store;
pub mod viewer;

pub use config::RelayConfig;
pub use error::{ApiError, RelayError, RelayResult};
pub use hub::{PublishReport, Subscriber, SubscriberHub, SubscriberId, SubscriptionGuard};
pub use relay::TextRelay;
pub use store::{TextStore, WriteMode};
