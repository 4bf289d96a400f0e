//! Latin Hypercube sampling of standard-normal variates.
//!
//! Plain Monte Carlo wastes draws by clustering; stratifying the unit
//! interval guarantees every probability bin contributes exactly one draw,
//! which noticeably tightens the hazard-curve tails for the sample sizes
//! used here (hundreds to a few thousand).

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::AppError;
use crate::math::inv_norm_cdf;

// Keeps stratum probabilities away from the CDF's open endpoints.
const P_MARGIN: f64 = 1e-12;

/// Draw one uniform point per stratum, in stratum order: the `i`-th value
/// lies in `[i/n, (i+1)/n)`.
pub fn stratified_uniforms(n: usize, rng: &mut impl Rng) -> Result<Vec<f64>, AppError> {
    if n < 1 {
        return Err(AppError::invalid_argument(
            "Stratified sampling requires at least one stratum.",
        ));
    }
    let n_f = n as f64;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u: f64 = rng.gen_range(0.0..1.0);
        let p = ((i as f64 + u) / n_f).clamp(P_MARGIN, 1.0 - P_MARGIN);
        out.push(p);
    }
    Ok(out)
}

/// Draw `n` standard-normal variates, one per probability stratum, then
/// permute them.
///
/// The permutation is required: without it, position in the output would
/// correlate with stratum rank and corrupt any later joint sampling with
/// other hazard variables.
pub fn latin_hypercube_normal(n: usize, rng: &mut impl Rng) -> Result<Vec<f64>, AppError> {
    let ps = stratified_uniforms(n, rng)?;
    let mut variates = Vec::with_capacity(n);
    for p in ps {
        variates.push(inv_norm_cdf(p)?);
    }
    variates.shuffle(rng);
    Ok(variates)
}
