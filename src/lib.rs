//! `scour-curves` library crate.
//!
//! The binary (`scour`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., driving fragility studies from notebooks
//!   or batch scripts)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod hazard;
pub mod io;
pub mod math;
pub mod report;
