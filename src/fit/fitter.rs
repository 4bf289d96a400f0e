//! Candidate evaluation and selection for the bilinear profile fit.
//!
//! Given displacement/force pairs `(d_i, f_i)` and a breakpoint grid, we
//! solve, for each candidate yield displacement `dy`:
//!
//! - an origin-constrained least squares slope `k1` on `d < dy`
//!   (clamped at 0: negative pre-yield stiffness is non-physical)
//! - a continuity-constrained least squares slope `k2` on `d >= dy`,
//!   forcing the two lines to meet at `(dy, k1 * dy)`
//! - the sum of squared residuals over all samples
//!
//! and return the first candidate (in increasing `dy` order) attaining the
//! minimum residual.

use rayon::prelude::*;

use crate::domain::{BilinearFit, FitConfig};
use crate::error::AppError;
use crate::fit::grid::breakpoint_grid;

#[derive(Debug, Clone)]
struct Candidate {
    idx: usize,
    k1: f64,
    k2: f64,
    dy: f64,
    sse: f64,
}

/// Evaluate the fitted profile at displacement `x`.
pub fn predict(k1: f64, k2: f64, dy: f64, x: f64) -> f64 {
    if x < dy {
        k1 * x
    } else {
        k2 * x + (k1 - k2) * dy
    }
}

/// Fit a continuous two-segment linear profile by breakpoint grid search.
pub fn fit_bilinear(d: &[f64], f: &[f64], config: &FitConfig) -> Result<BilinearFit, AppError> {
    if d.is_empty() || f.is_empty() {
        return Err(AppError::invalid_argument(
            "Displacement and force sequences must be non-empty.",
        ));
    }
    if d.len() != f.len() {
        return Err(AppError::invalid_argument(format!(
            "Displacement/force length mismatch: {} vs {}.",
            d.len(),
            f.len()
        )));
    }
    if let Some(bad) = d.iter().chain(f.iter()).find(|v| !v.is_finite()) {
        return Err(AppError::invalid_argument(format!(
            "Samples must be finite (found {bad})."
        )));
    }

    let (d_min, d_max) = d
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });

    let grid = breakpoint_grid(d_min, d_max, config.grid_size)?;

    // Evaluate each breakpoint independently (parallel). The indexed collect
    // preserves grid order, so the selection scan below sees candidates in
    // increasing dy.
    let candidates: Vec<Candidate> = grid
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &dy)| {
            evaluate_candidate(d, f, dy).map(|(k1, k2, sse)| Candidate {
                idx,
                k1,
                k2,
                dy,
                sse,
            })
        })
        .collect();

    // Strict `<` so ties resolve to the earliest (lowest dy) candidate.
    let mut best: Option<&Candidate> = None;
    for c in &candidates {
        if best.map_or(true, |b| c.sse < b.sse) {
            best = Some(c);
        }
    }

    let Some(best) = best else {
        return Err(AppError::insufficient_data(
            "No viable breakpoint: every candidate left one side of the split empty.",
        ));
    };
    debug_assert!(candidates.windows(2).all(|w| w[0].idx < w[1].idx));

    Ok(BilinearFit {
        k1: best.k1,
        k2: best.k2,
        dy: best.dy,
        fy: best.k1 * best.dy,
        sse: best.sse,
    })
}

/// Solve both segment slopes for one breakpoint.
///
/// Returns `None` when the candidate is unusable: an empty partition, or a
/// zero denominator in either regression (all segment displacements at the
/// origin / at the breakpoint). Skipped candidates simply drop out of the
/// search; if all of them drop out the caller reports insufficient data.
fn evaluate_candidate(d: &[f64], f: &[f64], dy: f64) -> Option<(f64, f64, f64)> {
    let mut num1 = 0.0;
    let mut den1 = 0.0;
    let mut n1 = 0usize;
    let mut n2 = 0usize;
    for (&di, &fi) in d.iter().zip(f) {
        if di < dy {
            num1 += di * fi;
            den1 += di * di;
            n1 += 1;
        } else {
            n2 += 1;
        }
    }
    if n1 == 0 || n2 == 0 || den1 <= 0.0 {
        return None;
    }
    let k1 = (num1 / den1).max(0.0);

    // Continuity constraint: segment 2 regresses (f - k1*dy) on (d - dy)
    // through the shared knee point.
    let mut num2 = 0.0;
    let mut den2 = 0.0;
    for (&di, &fi) in d.iter().zip(f) {
        if di >= dy {
            num2 += (di - dy) * (fi - k1 * dy);
            den2 += (di - dy) * (di - dy);
        }
    }
    if den2 <= 0.0 {
        return None;
    }
    let k2 = num2 / den2;

    let sse: f64 = d
        .iter()
        .zip(f)
        .map(|(&di, &fi)| {
            let r = fi - predict(k1, k2, dy, di);
            r * r
        })
        .sum();

    if !(k1.is_finite() && k2.is_finite() && sse.is_finite()) {
        return None;
    }
    Some((k1, k2, sse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn bilinear_samples(k1: f64, k2: f64, dy: f64, n: usize, d_max: f64) -> (Vec<f64>, Vec<f64>) {
        let mut d = Vec::with_capacity(n);
        let mut f = Vec::with_capacity(n);
        for i in 0..n {
            let x = d_max * i as f64 / (n - 1) as f64;
            d.push(x);
            f.push(predict(k1, k2, dy, x));
        }
        (d, f)
    }

    #[test]
    fn recovers_noiseless_parameters_within_grid_tolerance() {
        let (d, f) = bilinear_samples(2.0, 0.5, 4.0, 101, 10.0);
        let fit = fit_bilinear(&d, &f, &FitConfig { grid_size: 200 }).unwrap();

        // One grid step over (0, 10) with 200 points is ~0.05.
        assert!((fit.dy - 4.0).abs() < 0.06, "dy = {}", fit.dy);
        assert!((fit.k1 - 2.0).abs() < 0.05, "k1 = {}", fit.k1);
        assert!((fit.k2 - 0.5).abs() < 0.05, "k2 = {}", fit.k2);
        assert!((fit.fy - fit.k1 * fit.dy).abs() < 1e-12);
        assert!(fit.dy > 0.0 && fit.dy < 10.0);
    }

    #[test]
    fn initial_stiffness_is_clamped_non_negative() {
        // Force decreases with displacement; the unconstrained slope would
        // be negative.
        let d: Vec<f64> = (1..=20).map(|i| i as f64 * 0.5).collect();
        let f: Vec<f64> = d.iter().map(|x| -2.0 * x).collect();
        let fit = fit_bilinear(&d, &f, &FitConfig::default()).unwrap();
        assert_eq!(fit.k1, 0.0);
        assert_eq!(fit.fy, 0.0);
    }

    #[test]
    fn ties_resolve_to_the_earliest_breakpoint() {
        // f == 0 everywhere fits every candidate exactly (k1 = k2 = 0), so
        // every candidate has sse == 0 and the first grid point must win.
        let d: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let f = vec![0.0; 50];
        let fit = fit_bilinear(&d, &f, &FitConfig { grid_size: 100 }).unwrap();
        // Candidates with dy <= 1.0 are skipped (their left segment holds
        // only d = 0, a zero regression denominator), so the first viable
        // grid point wins the tie.
        let grid = breakpoint_grid(0.0, 49.0, 100).unwrap();
        let expected = grid.iter().copied().find(|&g| g > 1.0).unwrap();
        assert_eq!(fit.dy, expected);
        assert_eq!(fit.sse, 0.0);
    }

    #[test]
    fn rejects_mismatched_or_empty_inputs() {
        let cfg = FitConfig::default();
        let err = fit_bilinear(&[], &[], &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = fit_bilinear(&[1.0, 2.0], &[1.0], &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = fit_bilinear(&[1.0, f64::NAN], &[1.0, 2.0], &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn rejects_degenerate_grid_size() {
        let (d, f) = bilinear_samples(2.0, 0.5, 4.0, 11, 10.0);
        let err = fit_bilinear(&d, &f, &FitConfig { grid_size: 1 }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn constant_displacements_are_insufficient_data() {
        let d = vec![3.0; 10];
        let f = vec![1.0; 10];
        let err = fit_bilinear(&d, &f, &FitConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn prediction_is_continuous_at_the_knee() {
        let below = predict(2.0, 0.5, 4.0, 4.0 - 1e-12);
        let at = predict(2.0, 0.5, 4.0, 4.0);
        assert!((below - at).abs() < 1e-9);
    }
}
