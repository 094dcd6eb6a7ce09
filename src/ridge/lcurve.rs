//! L-curve: residual norm vs. solution norm across regularization parameters.
//!
//! With `xt = Uᵗ y` and filter factors `f_j = s_j / (s_j² + λ²)`:
//!
//! ```text
//! η(λ) = ||c~(λ)||          = || f ⊙ xt ||
//! ρ(λ) = ||y - X~ c~(λ)||   = sqrt( ||(1 - s ⊙ f) ⊙ xt||² + δ² )
//! ```
//!
//! where `δ² = ||y||² - ||Uᵗ y||²` is the part of `y` the SVD cannot see. It is
//! only added when there are more observations than parameters.
//!
//! Reference: P. C. Hansen & D. P. O'Leary, "The use of the L-curve in the
//! regularization of discrete ill-posed problems", SIAM J. Sci. Comput. 14 (1993).

use nalgebra::DVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{RidgeError, RidgeResult};
use crate::ridge::reg_param::fill_regularization_parameters;
use crate::ridge::workspace::RidgeWorkspace;

/// Minimum number of points for curvature estimation.
pub const MIN_LCURVE_POINTS: usize = 3;

/// Index-aligned L-curve samples. `reg_param` is strictly decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LCurve {
    pub reg_param: Vec<f64>,
    /// Residual norms `||y - X c||`.
    pub rho: Vec<f64>,
    /// Solution norms `||L c||`.
    pub eta: Vec<f64>,
}

impl LCurve {
    pub fn len(&self) -> usize {
        self.reg_param.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reg_param.is_empty()
    }
}

/// Compute an `n_points` L-curve for `y`.
pub fn lcurve(y: &DVector<f64>, n_points: usize, work: &mut RidgeWorkspace) -> RidgeResult<LCurve> {
    let mut curve = LCurve {
        reg_param: vec![0.0; n_points],
        rho: vec![0.0; n_points],
        eta: vec![0.0; n_points],
    };
    lcurve_into(y, &mut curve.reg_param, &mut curve.rho, &mut curve.eta, work)?;
    Ok(curve)
}

/// Compute an L-curve into caller-provided buffers.
///
/// All three buffers must have the same length, at least [`MIN_LCURVE_POINTS`].
/// Their contents are unspecified on error.
pub fn lcurve_into(
    y: &DVector<f64>,
    reg_param: &mut [f64],
    rho: &mut [f64],
    eta: &mut [f64],
    work: &mut RidgeWorkspace,
) -> RidgeResult<()> {
    let n_points = rho.len();
    if n_points < MIN_LCURVE_POINTS {
        return Err(RidgeError::TooFewPoints(n_points));
    }
    if eta.len() != n_points {
        return Err(RidgeError::LengthMismatch {
            what: "eta vector",
            expected: n_points,
            actual: eta.len(),
        });
    }
    if reg_param.len() != n_points {
        return Err(RidgeError::LengthMismatch {
            what: "reg_param vector",
            expected: n_points,
            actual: reg_param.len(),
        });
    }
    work.check_rhs(y)?;
    work.project(y)?;

    let n = work.n();
    let p = work.p();
    let (svd, xt) = work.projection()?;
    let s = &svd.s;

    let normy = y.norm();
    let norm_uty = xt.norm();
    let dr = normy * normy - norm_uty * norm_uty;

    fill_regularization_parameters(svd.smin(), svd.smax(), reg_param)?;

    reg_param
        .par_iter()
        .zip(rho.par_iter_mut())
        .zip(eta.par_iter_mut())
        .for_each(|((&lambda, rho_i), eta_i)| {
            let lambda_sq = lambda * lambda;
            let mut eta_sq = 0.0;
            let mut rho_sq = 0.0;
            for (&sj, &xtj) in s.iter().zip(xt.iter()) {
                let f = sj / (sj * sj + lambda_sq);
                let e = f * xtj;
                let r = (1.0 - sj * f) * xtj;
                eta_sq += e * e;
                rho_sq += r * r;
            }
            *eta_i = eta_sq.sqrt();
            *rho_i = rho_sq.sqrt();
        });

    if n > p && dr > 0.0 {
        for r in rho.iter_mut() {
            *r = (*r * *r + dr).sqrt();
        }
    }

    work.restore_scale();

    log::debug!(
        "L-curve: {} points, lambda in [{:.3e}, {:.3e}], out-of-range residual^2={:.3e}",
        n_points,
        reg_param[n_points - 1],
        reg_param[0],
        dr.max(0.0)
    );

    Ok(())
}
