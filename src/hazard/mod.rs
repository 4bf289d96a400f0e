//! Probabilistic scour hazard sampling.
//!
//! Responsibilities:
//!
//! - draw Latin-Hypercube-stratified standard-normal variates
//! - map them to 50-year scour depths through the lognormal model
//! - summarize batches and combine independent runs

pub mod lhs;
pub mod sampler;

pub use lhs::*;
pub use sampler::*;
