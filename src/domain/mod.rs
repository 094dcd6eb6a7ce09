//! Domain types used by the application layer.
//!
//! This module defines:
//!
//! - configuration enums (`ProblemKind`, `PenaltyKind`)
//! - the run configuration built from CLI flags (`RunConfig`)
//! - the exported curve file schema (`CurveFile`)

pub mod types;

pub use types::*;
