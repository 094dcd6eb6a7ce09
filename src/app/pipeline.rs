//! Shared "selection pipeline" logic used by the `select` and `curve` commands.
//!
//! problem generation -> penalty -> standard form -> L-curve -> corner -> solve

use nalgebra::DVector;

use crate::data::{Problem, build_penalty, generate_problem};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::ridge::{RidgeSelection, RidgeWorkspace, ridge_solve, select_ridge};

/// All computed outputs of a single `lcurve select` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub problem: Problem,
    pub selection: RidgeSelection,
    /// `||c - c_true|| / ||c_true||` at the selected λ.
    pub relative_error: f64,
    /// Same measure for the unregularized (λ = 0) pseudo-inverse solution.
    pub unregularized_error: f64,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_selection(config: &RunConfig) -> Result<RunOutput, AppError> {
    if config.points < crate::ridge::MIN_LCURVE_POINTS {
        return Err(AppError::new(
            2,
            format!(
                "--points must be >= {} (got {}).",
                crate::ridge::MIN_LCURVE_POINTS,
                config.points
            ),
        ));
    }

    let problem = generate_problem(config)?;
    let penalty = build_penalty(config.penalty, config.cols);

    let mut work = RidgeWorkspace::new(config.rows, config.cols)?;
    let selection = select_ridge(
        &problem.x,
        &problem.y,
        &penalty,
        config.points,
        config.corner,
        &mut work,
    )?;

    // Baseline: same factorization, no damping.
    let baseline = ridge_solve(0.0, &problem.y, &mut work, false)?;
    let baseline = selection.transform.back_transform(&baseline.coefficients, &work)?;

    let regularized_error = relative_error(&selection.coefficients, &problem.c_true);
    let unregularized_error = relative_error(&baseline, &problem.c_true);

    log::info!(
        "relative error: regularized={:.4e} unregularized={:.4e}",
        regularized_error,
        unregularized_error
    );

    Ok(RunOutput {
        problem,
        selection,
        relative_error: regularized_error,
        unregularized_error,
    })
}

fn relative_error(c: &DVector<f64>, c_true: &DVector<f64>) -> f64 {
    let denom = c_true.norm();
    let diff = (c - c_true).norm();
    if denom > 0.0 { diff / denom } else { diff }
}
