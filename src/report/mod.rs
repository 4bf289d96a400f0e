//! Terminal reporting: formatted summaries and the hazard-curve table.

pub mod format;

pub use format::*;
