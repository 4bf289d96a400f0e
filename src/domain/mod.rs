//! Shared domain types: configs and results.

pub mod types;

pub use types::*;
