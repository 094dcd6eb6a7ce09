//! Synthetic ill-posed test problems.
//!
//! Each problem is built as:
//!
//! ```text
//! y = X c_true + e,   e ~ N(0, σ²),   σ = noise · RMS(X c_true)
//! ```
//!
//! with a smooth `c_true` (two Gaussian bumps), so the exact answer is known and
//! the benefit of regularization can be measured.

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{PenaltyKind, ProblemKind, RunConfig};
use crate::error::AppError;
use crate::ridge::Penalty;

#[derive(Debug, Clone)]
pub struct Problem {
    pub kind: ProblemKind,
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
    pub c_true: DVector<f64>,
    /// Absolute noise standard deviation actually used.
    pub noise_sigma: f64,
}

pub fn generate_problem(config: &RunConfig) -> Result<Problem, AppError> {
    if config.rows == 0 || config.cols == 0 {
        return Err(AppError::new(2, "Problem dimensions must be > 0."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(2, format!("Invalid noise level: {}", config.noise)));
    }
    if config.problem == ProblemKind::Blur
        && !(config.blur_sigma.is_finite() && config.blur_sigma > 0.0)
    {
        return Err(AppError::new(2, format!("Invalid blur width: {}", config.blur_sigma)));
    }

    let x = design_matrix(config.problem, config.rows, config.cols, config.blur_sigma);
    let c_true = true_coefficients(config.cols);
    let exact = &x * &c_true;

    let rms = (exact.norm_squared() / config.rows as f64).sqrt();
    let noise_sigma = config.noise * rms;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, noise_sigma)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;
    let y = exact.map(|v| v + normal.sample(&mut rng));

    log::debug!(
        "generated {} problem: {}x{}, noise sigma={:.3e}",
        config.problem.display_name(),
        config.rows,
        config.cols,
        noise_sigma
    );

    Ok(Problem {
        kind: config.problem,
        x,
        y,
        c_true,
        noise_sigma,
    })
}

/// Build the `n × p` design matrix for `kind`.
pub fn design_matrix(kind: ProblemKind, n: usize, p: usize, blur_sigma: f64) -> DMatrix<f64> {
    match kind {
        ProblemKind::Hilbert => DMatrix::from_fn(n, p, |i, j| 1.0 / (i + j + 1) as f64),
        ProblemKind::Blur => {
            let norm = 1.0 / (blur_sigma * (2.0 * std::f64::consts::PI).sqrt() * p as f64);
            DMatrix::from_fn(n, p, |i, j| {
                let d = midpoint(i, n) - midpoint(j, p);
                norm * (-d * d / (2.0 * blur_sigma * blur_sigma)).exp()
            })
        }
        ProblemKind::Vandermonde => {
            DMatrix::from_fn(n, p, |i, j| {
                let t = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
                t.powi(j as i32)
            })
        }
    }
}

/// Smooth reference solution on `p` grid points.
pub fn true_coefficients(p: usize) -> DVector<f64> {
    DVector::from_fn(p, |j, _| {
        let s = midpoint(j, p);
        bump(s, 0.3, 0.1) + 0.6 * bump(s, 0.7, 0.15)
    })
}

/// Build the Tikhonov penalty for `kind`.
pub fn build_penalty(kind: PenaltyKind, p: usize) -> Penalty {
    match kind {
        PenaltyKind::Identity => Penalty::identity(p),
        PenaltyKind::Ramp => Penalty::Diagonal(DVector::from_fn(p, |j, _| (j + 1) as f64 / p as f64)),
        PenaltyKind::Difference => Penalty::General(DMatrix::from_fn(p, p, |i, j| {
            if i == j {
                1.0
            } else if j == i + 1 {
                -1.0
            } else {
                0.0
            }
        })),
    }
}

fn midpoint(i: usize, n: usize) -> f64 {
    (i as f64 + 0.5) / n as f64
}

fn bump(s: f64, center: f64, width: f64) -> f64 {
    let z = (s - center) / width;
    (-z * z).exp()
}
