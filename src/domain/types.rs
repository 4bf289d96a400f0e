//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting/sampling
//! - exported to JSON for downstream fragility tooling
//! - reloaded later for batch combination

use serde::{Deserialize, Serialize};

/// Paired displacement/force samples (e.g., from a pushover run).
///
/// Sequences are index-aligned and must have equal length; validation
/// happens at the fitting boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplePair {
    /// Displacements (m).
    pub disp: Vec<f64>,
    /// Forces (kN).
    pub force: Vec<f64>,
}

/// Configuration for the bilinear profile fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitConfig {
    /// Number of candidate yield displacements scanned across the open
    /// interval between the smallest and largest observed displacement.
    pub grid_size: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self { grid_size: 200 }
    }
}

/// Result of a bilinear (two-segment, continuity-constrained) fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilinearFit {
    /// Initial (pre-yield) stiffness, clamped to be non-negative.
    pub k1: f64,
    /// Post-yield stiffness.
    pub k2: f64,
    /// Yield displacement; strictly inside the observed displacement range.
    pub dy: f64,
    /// Yield force, `k1 * dy`.
    pub fy: f64,
    /// Sum of squared residuals of the winning candidate (diagnostic).
    pub sse: f64,
}

/// Hydraulic parameters and sampling controls for the scour hazard sampler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardConfig {
    /// Number of Latin Hypercube samples to draw.
    pub sample_count: usize,
    /// Upstream flow velocity (m/s).
    pub velocity: f64,
    /// Pier diameter (m).
    pub pier_diameter: f64,
    /// Kinematic water viscosity (m^2/s).
    pub viscosity: f64,
    /// Initial scour rate (mm/hr).
    pub initial_scour_rate: f64,
    /// Reynolds number override; computed from velocity/diameter/viscosity
    /// when absent.
    pub reynolds: Option<f64>,
    /// RNG seed; equal seeds reproduce the sample bit-for-bit.
    pub seed: u64,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            sample_count: 1000,
            velocity: 10.0,
            pier_diameter: 2.0,
            viscosity: 1e-6,
            initial_scour_rate: 8.0,
            reynolds: None,
            seed: 42,
        }
    }
}

/// Deterministic scale parameters behind a hazard sample, kept for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardScales {
    /// Reynolds number actually used (supplied or derived).
    pub reynolds: f64,
    /// Equilibrium maximum scour depth (mm).
    pub z_max_mm: f64,
    /// Median 50-year scour depth (mm), before the lognormal spread.
    pub z50_mm: f64,
}

/// A batch of sampled 50-year scour depths plus fitted lognormal summary.
///
/// `depths` preserves draw order (clamped, never reordered); `depths_sorted`
/// and `exceed_cdf` are the hazard-curve view. All statistics are computed
/// from the raw sample, never from per-batch summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardResult {
    /// Scour depths (m), each clamped to [`MAX_SCOUR_DEPTH_M`].
    pub depths: Vec<f64>,
    /// Sorted copy of `depths`.
    pub depths_sorted: Vec<f64>,
    /// Lognormal CDF evaluated at each entry of `depths_sorted`, using the
    /// fitted `log_mean` / `log_std` as distribution parameters.
    pub cdf: Vec<f64>,
    /// Mean of `depths`.
    pub mean: f64,
    /// Population standard deviation of `depths`.
    pub std: f64,
    /// Mean of `ln(depths)`.
    pub log_mean: f64,
    /// Population standard deviation of `ln(depths)`.
    pub log_std: f64,
    /// Scale parameters of the run; absent on combined batches, where a
    /// single set of scales would be meaningless.
    pub scales: Option<HazardScales>,
}

/// Physical ceiling on sampled scour depth (m). The modeled piers are 20 m
/// tall; deeper scour is non-physical, so draws are truncated (kept, not
/// discarded) at this value.
pub const MAX_SCOUR_DEPTH_M: f64 = 20.0;

/// Portable JSON representation of a completed fit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub config: FitConfig,
    pub fit: BilinearFit,
}

/// Portable JSON representation of a hazard batch (or combined batches).
///
/// `config` is absent on re-combined files, where no single configuration
/// describes the sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardFile {
    pub tool: String,
    pub config: Option<HazardConfig>,
    pub result: HazardResult,
}
