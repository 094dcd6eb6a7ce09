//! Error types.
//!
//! - `RidgeError`: returned by every numeric entry point of the library.
//! - `AppError`: what the `lcurve` binary reports, carrying a process exit code.

use thiserror::Error;

/// Broad class of a [`RidgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input's size disagrees with the workspace or with another input.
    Shape,
    /// Mathematically invalid input.
    Domain,
    /// A factorization failed because the problem itself is not invertible.
    Singular,
    /// No finite curvature anywhere on the L-curve.
    Degenerate,
}

/// Errors produced by the regularization routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RidgeError {
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        what: &'static str,
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("penalty matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("at least 3 points are needed for L-curve analysis, got {0}")]
    TooFewPoints(usize),

    #[error("workspace dimensions must be positive, got {n}x{p}")]
    EmptyWorkspace { n: usize, p: usize },

    #[error("penalty weight {index} is {value}; the diagonal penalty is singular")]
    InvalidPenaltyWeight { index: usize, value: f64 },

    #[error("largest singular value must be positive, got {0}")]
    NonPositiveSmax(f64),

    #[error("regularization parameter must be finite and >= 0, got {0}")]
    InvalidLambda(f64),

    #[error("{0} contains non-finite values")]
    NonFiniteInput(&'static str),

    #[error("standard-form factorization is stale; transform the design matrix first")]
    StaleFactorization,

    #[error("penalty matrix is singular (|R[{index},{index}]| = {value:e})")]
    SingularPenalty { index: usize, value: f64 },

    #[error("SVD of the standard-form matrix failed to converge")]
    SvdFailed,

    #[error("failed to find a minimum radius of curvature (L-curve points may be colinear)")]
    NoCorner,
}

impl RidgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LengthMismatch { .. }
            | Self::ShapeMismatch { .. }
            | Self::NotSquare { .. } => ErrorKind::Shape,
            Self::TooFewPoints(_)
            | Self::EmptyWorkspace { .. }
            | Self::InvalidPenaltyWeight { .. }
            | Self::NonPositiveSmax(_)
            | Self::InvalidLambda(_)
            | Self::NonFiniteInput(_)
            | Self::StaleFactorization => ErrorKind::Domain,
            Self::SingularPenalty { .. } | Self::SvdFailed => ErrorKind::Singular,
            Self::NoCorner => ErrorKind::Degenerate,
        }
    }
}

/// Library result alias.
pub type RidgeResult<T> = Result<T, RidgeError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<RidgeError> for AppError {
    fn from(err: RidgeError) -> Self {
        Self::new(3, format!("Regularization failed: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
