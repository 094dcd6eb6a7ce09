//! Input data for the `lcurve` binary: synthetic test problems and penalties.

pub mod problems;

pub use problems::*;
