//! Linear-algebra adapters over `nalgebra`.
//!
//! The regularization code only needs two factorizations:
//! - a thin SVD with singular values in descending order (`svd`)
//! - an owned QR factorization of a square penalty matrix (`qr`)

pub mod qr;
pub mod svd;

pub use qr::*;
pub use svd::*;
