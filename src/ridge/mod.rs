//! Tikhonov regularization with L-curve parameter selection.
//!
//! Responsibilities:
//!
//! - transform a penalized problem to standard form and back (`transform`)
//! - solve the standard-form ridge problem for a fixed λ (`solve`)
//! - generate candidate λ values from the singular spectrum (`reg_param`)
//! - evaluate the L-curve across those candidates (`lcurve`)
//! - locate the L-curve corner (`corner`)
//! - chain all of the above (`select`)
//!
//! Every entry point takes a caller-owned [`RidgeWorkspace`].

pub mod corner;
pub mod lcurve;
pub mod reg_param;
pub mod select;
pub mod solve;
pub mod transform;
pub mod workspace;

pub use corner::*;
pub use lcurve::*;
pub use reg_param::*;
pub use select::*;
pub use solve::*;
pub use transform::*;
pub use workspace::*;
