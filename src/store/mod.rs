//! Storage for the current text.
//!
//! Holds the single mutable text value shared by the producer endpoint and
//! every pull-mode reader.

pub mod text_store;
pub mod types;

pub use text_store::*;
pub use types::*;
