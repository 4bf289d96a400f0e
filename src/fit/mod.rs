//! Bilinear profile fitting.
//!
//! Responsibilities:
//!
//! - generate the candidate yield-displacement grid
//! - evaluate each candidate breakpoint (parallel)
//! - select the first-minimum candidate deterministically

pub mod fitter;
pub mod grid;

pub use fitter::*;
pub use grid::*;
