//! Candidate regularization parameters for L-curve analysis.
//!
//! The candidates are geometrically spaced between the largest singular value
//! and the smallest one that is still numerically meaningful:
//!
//! ```text
//! λ[N-1] = max(smin, 16 ε smax)
//! λ[i]   = r λ[i+1],   r = (smax / λ[N-1])^(1/(N-1))
//! ```
//!
//! so `λ[0] ≈ smax` and the sequence is strictly decreasing whenever
//! `smax > max(smin, 16 ε smax)`. When all singular values are equal (e.g. an
//! orthonormal design) every candidate is `smax`, the L-curve collapses to a
//! single point, and corner detection reports `NoCorner`.

use crate::error::{RidgeError, RidgeResult};

/// Floor on `smin / smax`.
pub const SMIN_RATIO: f64 = 16.0 * f64::EPSILON;

/// Allocate and fill `n_points` candidates.
pub fn regularization_parameters(smin: f64, smax: f64, n_points: usize) -> RidgeResult<Vec<f64>> {
    let mut out = vec![0.0; n_points];
    fill_regularization_parameters(smin, smax, &mut out)?;
    Ok(out)
}

/// Fill `reg_param` with geometrically spaced candidates.
pub fn fill_regularization_parameters(smin: f64, smax: f64, reg_param: &mut [f64]) -> RidgeResult<()> {
    // `!(smax > 0)` also catches NaN.
    if !(smax > 0.0) {
        return Err(RidgeError::NonPositiveSmax(smax));
    }
    let n = reg_param.len();
    if n == 0 {
        return Err(RidgeError::LengthMismatch {
            what: "reg_param vector",
            expected: 1,
            actual: 0,
        });
    }

    // f64::max ignores a NaN smin.
    let new_smin = smin.max(smax * SMIN_RATIO);
    reg_param[n - 1] = new_smin;
    if n == 1 {
        return Ok(());
    }

    let ratio = (smax / new_smin).powf(1.0 / (n as f64 - 1.0));
    for i in (0..n - 1).rev() {
        reg_param[i] = ratio * reg_param[i + 1];
    }

    Ok(())
}
