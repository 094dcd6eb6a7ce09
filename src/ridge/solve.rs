//! Ridge solution for a fixed regularization parameter.
//!
//! Given the cached SVD `X~ = U S Vᵗ`, the minimizer of
//! `||y - X~ c~||² + λ² ||c~||²` is
//!
//! ```text
//! c~ = V diag(f) Uᵗ y,    f_j = s_j / (s_j² + λ²)
//! ```
//!
//! At `λ = 0` this degenerates to the pseudo-inverse; directions with
//! `s_j <= ε s_0` are dropped there instead of being divided by ~0.

use nalgebra::{DMatrix, DVector};

use crate::error::{RidgeError, RidgeResult};
use crate::ridge::workspace::RidgeWorkspace;

/// Relative singular value cutoff for the unregularized (`λ = 0`) solve.
pub const PINV_TOLERANCE: f64 = f64::EPSILON;

/// Output of [`ridge_solve`], in standard form.
#[derive(Debug, Clone)]
pub struct RidgeSolution {
    pub lambda: f64,
    /// Standard-form coefficients `c~`.
    pub coefficients: DVector<f64>,
    /// `||y - X~ c~||`.
    pub residual_norm: f64,
    /// `||c~||`, i.e. `||L c||` in the original parameterization.
    pub solution_norm: f64,
    /// `λ ||c~||`.
    pub penalty_norm: f64,
    /// `V diag(f²) Vᵗ`, the coefficient covariance for unit noise variance.
    pub covariance: Option<DMatrix<f64>>,
    /// Number of singular directions used.
    ///
    /// Damping never drops a direction, so for `λ > 0` this is always
    /// `min(n, p)`. Only the `λ = 0` pseudo-inverse can report less.
    pub rank: usize,
}

/// Solve the standard-form ridge problem at `lambda`.
pub fn ridge_solve(
    lambda: f64,
    y: &DVector<f64>,
    work: &mut RidgeWorkspace,
    with_covariance: bool,
) -> RidgeResult<RidgeSolution> {
    if !(lambda.is_finite() && lambda >= 0.0) {
        return Err(RidgeError::InvalidLambda(lambda));
    }
    work.check_rhs(y)?;
    work.project(y)?;

    let n = work.n();
    let p = work.p();
    let rho_ls = if n > p { work.out_of_range_norm(y)? } else { 0.0 };

    let lambda_sq = lambda * lambda;
    let (svd, xt, filtered, qsi) = work.solver_parts()?;
    let s0 = svd.smax();

    let mut rank = 0;
    let mut resid_sq = 0.0;
    for j in 0..svd.len() {
        let sj = svd.s[j];
        let f = if lambda > 0.0 {
            sj / (sj * sj + lambda_sq)
        } else if sj > PINV_TOLERANCE * s0 {
            1.0 / sj
        } else {
            0.0
        };
        if f != 0.0 || lambda > 0.0 {
            rank += 1;
        }

        filtered[j] = f * xt[j];
        let r = (1.0 - sj * f) * xt[j];
        resid_sq += r * r;

        if with_covariance {
            let mut col = qsi.column_mut(j);
            col.copy_from(&svd.v.column(j));
            col *= f;
        }
    }

    let coefficients = &svd.v * &*filtered;
    let solution_norm = filtered.norm();
    let residual_norm = (resid_sq + rho_ls * rho_ls).sqrt();
    let covariance = with_covariance.then(|| &*qsi * qsi.transpose());

    work.restore_scale();

    log::trace!(
        "ridge solve: lambda={lambda:.6e} rnorm={residual_norm:.6e} snorm={solution_norm:.6e} rank={rank}"
    );

    Ok(RidgeSolution {
        lambda,
        coefficients,
        residual_norm,
        solution_norm,
        penalty_norm: lambda * solution_norm,
        covariance,
        rank,
    })
}
