//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from CLI flags
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::ridge::{CornerMethod, LCurve};

/// Synthetic ill-posed test problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProblemKind {
    /// `X_ij = 1 / (i + j + 1)`. Severely ill-conditioned even for small p.
    Hilbert,
    /// Discretized Gaussian blur on `[0, 1]` (deconvolution).
    Blur,
    /// Polynomial design `X_ij = t_i^j` on `t ∈ [0, 1]`.
    Vandermonde,
}

impl ProblemKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hilbert => "Hilbert",
            Self::Blur => "Gaussian blur",
            Self::Vandermonde => "Vandermonde",
        }
    }
}

/// Which Tikhonov penalty `L` to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PenaltyKind {
    /// `L = I` (plain ridge).
    Identity,
    /// `L = diag(1/p, 2/p, ..., 1)`: later coefficients are penalized harder.
    Ramp,
    /// Unit upper-bidiagonal first difference `(L c)_i = c_i - c_{i+1}`, last row `c_p`.
    Difference,
}

impl PenaltyKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Ramp => "diagonal ramp",
            Self::Difference => "first difference",
        }
    }
}

/// Runtime configuration (derived from CLI flags).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub problem: ProblemKind,
    pub rows: usize,
    pub cols: usize,
    /// Noise standard deviation relative to the RMS of the exact data.
    pub noise: f64,
    pub seed: u64,
    /// Kernel width for `ProblemKind::Blur`.
    pub blur_sigma: f64,

    pub penalty: PenaltyKind,
    /// Number of L-curve points.
    pub points: usize,
    pub corner: CornerMethod,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

/// On-disk L-curve (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub problem: ProblemKind,
    pub rows: usize,
    pub cols: usize,
    pub noise: f64,
    pub seed: u64,
    pub penalty: PenaltyKind,
    pub method: CornerMethod,
    pub corner: usize,
    pub lambda: f64,
    pub curve: LCurve,
}
