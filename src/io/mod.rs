//! Input/output helpers.
//!
//! - L-curve CSV export (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
