//! Automatic regularization: transform, L-curve, corner, solve, back-transform.

use nalgebra::{DMatrix, DVector};

use crate::error::RidgeResult;
use crate::ridge::corner::CornerMethod;
use crate::ridge::lcurve::{LCurve, lcurve};
use crate::ridge::solve::{RidgeSolution, ridge_solve};
use crate::ridge::transform::{Penalty, PenaltyTransform, standard_form};
use crate::ridge::workspace::RidgeWorkspace;

/// Result of [`select_ridge`].
#[derive(Debug, Clone)]
pub struct RidgeSelection {
    pub curve: LCurve,
    pub method: CornerMethod,
    /// Index of the corner in `curve`.
    pub corner: usize,
    /// `curve.reg_param[corner]`.
    pub lambda: f64,
    /// Standard-form solution at `lambda` (with covariance).
    pub solution: RidgeSolution,
    /// Coefficients in the original parameterization, `c = L^{-1} c~`.
    pub coefficients: DVector<f64>,
    pub transform: PenaltyTransform,
}

/// Pick `λ` at the L-curve corner and solve the regularized problem there.
pub fn select_ridge(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    penalty: &Penalty,
    n_points: usize,
    method: CornerMethod,
    work: &mut RidgeWorkspace,
) -> RidgeResult<RidgeSelection> {
    let transform = standard_form(x, penalty, work)?;
    let curve = lcurve(y, n_points, work)?;
    let corner = method.locate(&curve)?;
    let lambda = curve.reg_param[corner];

    let solution = ridge_solve(lambda, y, work, true)?;
    let coefficients = transform.back_transform(&solution.coefficients, work)?;

    log::info!(
        "selected lambda={:.6e} ({} corner, index {}/{}): rnorm={:.6e} snorm={:.6e}",
        lambda,
        method.display_name(),
        corner,
        curve.len(),
        solution.residual_norm,
        solution.solution_norm
    );

    Ok(RidgeSelection {
        curve,
        method,
        corner,
        lambda,
        solution,
        coefficients,
        transform,
    })
}
