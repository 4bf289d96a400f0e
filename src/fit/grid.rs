//! Breakpoint grid generation.
//!
//! We fit the bilinear profile using a deterministic grid search over the
//! yield displacement `dy`.
//!
//! Why grid search?
//! - It avoids local minima issues common in nonlinear optimization.
//! - It is deterministic given the same inputs.
//! - With one search dimension, a modest grid is fast enough for routine
//!   pushover post-processing.

use crate::error::AppError;

/// Margin keeping candidates strictly inside the observed range, so both
/// sides of every split can be non-empty.
pub const GRID_MARGIN: f64 = 1e-6;

/// Generate `steps` evenly spaced breakpoint candidates spanning the open
/// interval `(min + GRID_MARGIN, max - GRID_MARGIN)`, inclusive of both
/// shifted endpoints, in increasing order.
pub fn breakpoint_grid(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(AppError::invalid_argument(format!(
            "Invalid displacement range: min={min}, max={max} (must be finite)."
        )));
    }
    if steps < 2 {
        return Err(AppError::invalid_argument("Grid size must be >= 2."));
    }
    let lo = min + GRID_MARGIN;
    let hi = max - GRID_MARGIN;
    if hi <= lo {
        // All displacements (numerically) coincide; no split can have data
        // on both sides.
        return Err(AppError::insufficient_data(format!(
            "Displacement range [{min}, {max}] is too narrow to place a breakpoint."
        )));
    }

    let step = (hi - lo) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(lo + step * i as f64);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn grid_stays_strictly_inside_range() {
        let g = breakpoint_grid(0.0, 10.0, 200).unwrap();
        assert_eq!(g.len(), 200);
        assert!(g[0] > 0.0);
        assert!(g[g.len() - 1] < 10.0);
        assert!(g.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn grid_endpoints_carry_the_margin() {
        let g = breakpoint_grid(1.0, 2.0, 5).unwrap();
        assert!((g[0] - (1.0 + GRID_MARGIN)).abs() < 1e-12);
        assert!((g[4] - (2.0 - GRID_MARGIN)).abs() < 1e-12);
    }

    #[test]
    fn degenerate_range_is_insufficient_data() {
        let err = breakpoint_grid(3.0, 3.0, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn tiny_grid_size_is_invalid() {
        let err = breakpoint_grid(0.0, 1.0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
