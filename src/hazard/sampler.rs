//! Scour depth sampling, batch statistics, and batch combination.
//!
//! The deterministic part of the model follows the empirical pier-scour
//! relations: an equilibrium depth from the Reynolds number, a
//! time-to-equilibrium power law in flow velocity and initial scour rate,
//! and a hyperbolic blend of the two for the 50-year median. The random
//! part spreads that median with a lognormal error term sampled by Latin
//! Hypercube.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::domain::{HazardConfig, HazardResult, HazardScales, MAX_SCOUR_DEPTH_M};
use crate::error::AppError;
use crate::hazard::lhs::latin_hypercube_normal;
use crate::math::{log_moments, lognormal_cdf, mean, std_dev};

/// Exposure horizon of the hazard estimate (years).
const EXPOSURE_YEARS: f64 = 50.0;

// Equilibrium scour depth (mm): z_max = 0.18 * Re^0.635.
const Z_MAX_COEFF: f64 = 0.18;
const Z_MAX_EXPONENT: f64 = 0.635;

// Time to equilibrium: t_eq = 73 * t^0.126 * v^1.706 * zdot^-0.2.
const T_EQ_COEFF: f64 = 73.0;
const T_EQ_TIME_EXPONENT: f64 = 0.126;
const T_EQ_VELOCITY_EXPONENT: f64 = 1.706;
const T_EQ_RATE_EXPONENT: f64 = -0.2;

// Lognormal error term on the median depth: exp(-0.085) median shift with
// dispersion 0.407 (calibrated on field scour observations).
const LOGNORMAL_MEDIAN_SHIFT: f64 = -0.085;
const LOGNORMAL_DISPERSION: f64 = 0.407;

const MM_PER_M: f64 = 1000.0;

/// Draw a Latin-Hypercube-stratified batch of 50-year scour depths.
///
/// Seeded per call from `config.seed`; equal configs reproduce the batch
/// bit-for-bit and concurrent calls share no RNG state.
pub fn sample_hazard(config: &HazardConfig) -> Result<HazardResult, AppError> {
    if config.sample_count < 1 {
        return Err(AppError::invalid_argument(
            "Sample count must be at least 1.",
        ));
    }
    let scales = scour_scales(config)?;
    let z50_mm = scales.z50_mm;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let variates = latin_hypercube_normal(config.sample_count, &mut rng)?;

    // Lognormal spread around the median, mm -> m, truncated at the pier
    // height limit (kept, not discarded: sample count is preserved).
    let depths: Vec<f64> = variates
        .iter()
        .map(|&z| {
            let depth_m =
                LOGNORMAL_MEDIAN_SHIFT.exp() * z50_mm * (LOGNORMAL_DISPERSION * z).exp() / MM_PER_M;
            depth_m.min(MAX_SCOUR_DEPTH_M)
        })
        .collect();

    summarize(depths, Some(scales))
}

/// Run `batches` independent hazard batches in parallel and combine them.
///
/// Batch `i` is seeded with `config.seed + i` (wrapping), so the result is
/// deterministic and each batch's draws are independent of the others.
pub fn sample_hazard_batches(config: &HazardConfig, batches: usize) -> Result<HazardResult, AppError> {
    if batches < 1 {
        return Err(AppError::invalid_argument(
            "Batch count must be at least 1.",
        ));
    }
    if batches == 1 {
        return sample_hazard(config);
    }

    let results: Vec<HazardResult> = (0..batches)
        .into_par_iter()
        .map(|i| {
            let batch_config = HazardConfig {
                seed: config.seed.wrapping_add(i as u64),
                ..config.clone()
            };
            sample_hazard(&batch_config)
        })
        .collect::<Result<_, _>>()?;

    combine(&results)
}

/// Combine independent batches into one.
///
/// Statistics and the sorted/CDF view are recomputed from the concatenated
/// raw samples; per-batch summaries are never averaged.
pub fn combine(batches: &[HazardResult]) -> Result<HazardResult, AppError> {
    if batches.is_empty() {
        return Err(AppError::invalid_argument(
            "Cannot combine an empty list of batches.",
        ));
    }
    let mut depths = Vec::with_capacity(batches.iter().map(|b| b.depths.len()).sum());
    for batch in batches {
        depths.extend_from_slice(&batch.depths);
    }
    summarize(depths, None)
}

/// Resolve the deterministic scale parameters of the scour model.
fn scour_scales(config: &HazardConfig) -> Result<HazardScales, AppError> {
    if !(config.velocity.is_finite() && config.velocity > 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Flow velocity must be positive and finite, got {}.",
            config.velocity
        )));
    }
    if !(config.pier_diameter.is_finite() && config.pier_diameter > 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Pier diameter must be positive and finite, got {}.",
            config.pier_diameter
        )));
    }
    if !(config.viscosity.is_finite() && config.viscosity > 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Viscosity must be positive and finite, got {}.",
            config.viscosity
        )));
    }
    if !(config.initial_scour_rate.is_finite() && config.initial_scour_rate > 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Initial scour rate must be positive and finite, got {}.",
            config.initial_scour_rate
        )));
    }

    let reynolds = match config.reynolds {
        Some(re) => re,
        None => config.velocity * config.pier_diameter / config.viscosity,
    };
    if !(reynolds.is_finite() && reynolds > 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Reynolds number must be positive and finite, got {reynolds}."
        )));
    }

    let z_max_mm = Z_MAX_COEFF * reynolds.powf(Z_MAX_EXPONENT);
    let t_eq = T_EQ_COEFF
        * EXPOSURE_YEARS.powf(T_EQ_TIME_EXPONENT)
        * config.velocity.powf(T_EQ_VELOCITY_EXPONENT)
        * config.initial_scour_rate.powf(T_EQ_RATE_EXPONENT);
    let z50_mm = t_eq / (1.0 / config.initial_scour_rate + t_eq / z_max_mm);

    if !(z_max_mm.is_finite() && z50_mm.is_finite() && z50_mm > 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Scour scale parameters left the model's domain \
             (z_max = {z_max_mm} mm, z50 = {z50_mm} mm); check the hydraulic inputs."
        )));
    }

    Ok(HazardScales {
        reynolds,
        z_max_mm,
        z50_mm,
    })
}

/// Compute every derived field of a [`HazardResult`] from raw depths.
fn summarize(depths: Vec<f64>, scales: Option<HazardScales>) -> Result<HazardResult, AppError> {
    let (log_mean, log_std) = log_moments(&depths)?;
    let mean = mean(&depths);
    let std = std_dev(&depths);

    let mut depths_sorted = depths.clone();
    depths_sorted.sort_by(|a, b| a.total_cmp(b));

    let mut cdf = Vec::with_capacity(depths_sorted.len());
    for &depth in &depths_sorted {
        cdf.push(lognormal_cdf(depth, log_mean, log_std)?);
    }

    Ok(HazardResult {
        depths,
        depths_sorted,
        cdf,
        mean,
        std,
        log_mean,
        log_std,
        scales,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn config(n: usize, seed: u64) -> HazardConfig {
        HazardConfig {
            sample_count: n,
            seed,
            ..HazardConfig::default()
        }
    }

    #[test]
    fn sample_count_is_preserved_and_depths_are_capped() {
        let result = sample_hazard(&config(1000, 42)).unwrap();
        assert_eq!(result.depths.len(), 1000);
        assert_eq!(result.depths_sorted.len(), 1000);
        assert_eq!(result.cdf.len(), 1000);
        assert!(result.depths.iter().all(|&z| z > 0.0 && z <= MAX_SCOUR_DEPTH_M));
        // With the default hydraulics the median depth is ~6 m and the
        // dispersion reaches past the 20 m cap, so clamping must actually
        // have occurred.
        assert_eq!(result.depths_sorted.last().copied().unwrap(), MAX_SCOUR_DEPTH_M);
    }

    #[test]
    fn equal_seeds_reproduce_unequal_seeds_diverge() {
        let a = sample_hazard(&config(200, 7)).unwrap();
        let b = sample_hazard(&config(200, 7)).unwrap();
        let c = sample_hazard(&config(200, 8)).unwrap();
        assert_eq!(a.depths, b.depths);
        assert_ne!(a.depths, c.depths);
    }

    #[test]
    fn supplied_reynolds_matches_derived_reynolds() {
        let base = config(100, 11);
        let derived = sample_hazard(&base).unwrap();
        let explicit = sample_hazard(&HazardConfig {
            reynolds: Some(base.velocity * base.pier_diameter / base.viscosity),
            ..base
        })
        .unwrap();
        assert_eq!(derived.depths, explicit.depths);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let err = sample_hazard(&config(0, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        for bad in [
            HazardConfig { viscosity: 0.0, ..config(10, 1) },
            HazardConfig { viscosity: -1e-6, ..config(10, 1) },
            HazardConfig { pier_diameter: 0.0, ..config(10, 1) },
            HazardConfig { velocity: -1.0, ..config(10, 1) },
            HazardConfig { initial_scour_rate: 0.0, ..config(10, 1) },
            HazardConfig { reynolds: Some(-5.0), ..config(10, 1) },
        ] {
            let err = sample_hazard(&bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn single_draw_batch_gets_a_step_cdf() {
        let result = sample_hazard(&config(1, 5)).unwrap();
        assert_eq!(result.depths.len(), 1);
        assert_eq!(result.log_std, 0.0);
        assert_eq!(result.std, 0.0);
        assert_eq!(result.cdf, vec![0.5]);
    }

    #[test]
    fn combining_a_single_batch_is_an_identity_on_statistics() {
        let batch = sample_hazard(&config(300, 21)).unwrap();
        let combined = combine(std::slice::from_ref(&batch)).unwrap();
        assert_eq!(combined.depths, batch.depths);
        assert_eq!(combined.depths_sorted, batch.depths_sorted);
        assert_eq!(combined.cdf, batch.cdf);
        assert_eq!(combined.mean, batch.mean);
        assert_eq!(combined.std, batch.std);
        assert_eq!(combined.log_mean, batch.log_mean);
        assert_eq!(combined.log_std, batch.log_std);
    }

    #[test]
    fn combined_statistics_come_from_the_concatenation() {
        let a = sample_hazard(&config(200, 1)).unwrap();
        let b = sample_hazard(&config(300, 2)).unwrap();
        let combined = combine(&[a.clone(), b.clone()]).unwrap();

        let mut concat = a.depths.clone();
        concat.extend_from_slice(&b.depths);
        assert_eq!(combined.depths, concat);
        assert_eq!(combined.depths.len(), 500);
        assert!((combined.mean - mean(&concat)).abs() < 1e-15);
        assert!((combined.std - std_dev(&concat)).abs() < 1e-15);
        assert!(combined.scales.is_none());

        // And never from averaging per-batch summaries: with unequal batch
        // sizes the naive average of means is a different number.
        let naive = (a.mean + b.mean) / 2.0;
        assert!((combined.mean - naive).abs() > 1e-12);
    }

    #[test]
    fn combining_nothing_is_invalid() {
        let err = combine(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn parallel_batches_are_deterministic() {
        let cfg = config(100, 42);
        let x = sample_hazard_batches(&cfg, 3).unwrap();
        let y = sample_hazard_batches(&cfg, 3).unwrap();
        assert_eq!(x.depths.len(), 300);
        assert_eq!(x.depths, y.depths);

        // The first batch reuses the base seed.
        let first = sample_hazard(&cfg).unwrap();
        assert_eq!(&x.depths[..100], first.depths.as_slice());
    }

    #[test]
    fn zero_batches_is_invalid() {
        let err = sample_hazard_batches(&config(10, 1), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn hazard_curve_cdf_is_monotone() {
        let result = sample_hazard(&config(500, 33)).unwrap();
        assert!(result.cdf.windows(2).all(|w| w[0] <= w[1]));
        assert!(result.cdf.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }
}
