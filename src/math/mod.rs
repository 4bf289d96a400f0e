//! Mathematical utilities: moments and distribution primitives.

pub mod stats;

pub use stats::*;
