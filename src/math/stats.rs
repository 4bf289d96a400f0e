//! Sample moments and distribution primitives.
//!
//! Everything here operates on plain `&[f64]` slices and is deliberately
//! free of domain vocabulary so both the fitter and the hazard sampler can
//! use it.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::AppError;

/// Arithmetic mean. Empty input is a caller bug guarded at operation
/// boundaries, so this returns NaN rather than erroring.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (divide by n, not n-1), matching the
/// convention used throughout the hazard workflow.
pub fn std_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64;
    var.sqrt()
}

/// Mean and population std of `ln(x)` over a strictly positive sample.
///
/// Non-positive entries are a domain fault; they are reported as an
/// `InvalidArgument` here so callers never see a raw `ln` NaN.
pub fn log_moments(xs: &[f64]) -> Result<(f64, f64), AppError> {
    if xs.is_empty() {
        return Err(AppError::invalid_argument(
            "Cannot compute log-moments of an empty sample.",
        ));
    }
    let mut logs = Vec::with_capacity(xs.len());
    for &x in xs {
        if !(x.is_finite() && x > 0.0) {
            return Err(AppError::invalid_argument(format!(
                "Log-moments require strictly positive finite samples (got {x})."
            )));
        }
        logs.push(x.ln());
    }
    Ok((mean(&logs), std_dev(&logs)))
}

/// Inverse CDF (quantile function) of the standard normal distribution.
pub fn inv_norm_cdf(p: f64) -> Result<f64, AppError> {
    if !(p.is_finite() && p > 0.0 && p < 1.0) {
        return Err(AppError::invalid_argument(format!(
            "Normal quantile requires p in (0, 1), got {p}."
        )));
    }
    let n = standard_normal()?;
    Ok(n.inverse_cdf(p))
}

/// Lognormal CDF with parameters `log_mean` / `log_std`, evaluated at `x`.
///
/// `log_std = 0` (a point-mass sample, e.g. a single draw or a fully
/// clamped batch) degenerates to the step function around `exp(log_mean)`
/// instead of surfacing a distribution-construction fault.
pub fn lognormal_cdf(x: f64, log_mean: f64, log_std: f64) -> Result<f64, AppError> {
    if !(x.is_finite() && x > 0.0) {
        return Err(AppError::invalid_argument(format!(
            "Lognormal CDF requires x > 0, got {x}."
        )));
    }
    if log_std < 0.0 || !log_std.is_finite() || !log_mean.is_finite() {
        return Err(AppError::invalid_argument(format!(
            "Invalid lognormal parameters: log_mean={log_mean}, log_std={log_std}."
        )));
    }
    let z = x.ln() - log_mean;
    if log_std == 0.0 {
        return Ok(if z < 0.0 {
            0.0
        } else if z > 0.0 {
            1.0
        } else {
            0.5
        });
    }
    let n = standard_normal()?;
    Ok(n.cdf(z / log_std))
}

fn standard_normal() -> Result<Normal, AppError> {
    Normal::new(0.0, 1.0)
        .map_err(|e| AppError::internal(format!("Standard normal construction failed: {e}")))
}
