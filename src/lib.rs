//! `ridge-lcurve` library crate.
//!
//! Tikhonov (ridge) regularization of linear least squares with automatic
//! choice of the regularization parameter at the corner of the L-curve.
//!
//! The binary (`lcurve`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the numerical kernels (`ridge`, `math`) are usable on their own

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod ridge;
