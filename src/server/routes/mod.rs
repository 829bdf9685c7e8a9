//! Route handlers module.

pub mod health;
pub mod text;
