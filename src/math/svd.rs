//! Thin singular value decomposition.
//!
//! `nalgebra` returns `U` as n×k and `Vᵗ` as k×p with `k = min(n, p)`.
//! We store `V` (not `Vᵗ`) because every consumer multiplies by it from the left,
//! and we re-sort the triplets so that `s[0]` is always the largest singular value.

use nalgebra::{DMatrix, DVector};

use crate::error::{RidgeError, RidgeResult};

/// `A = U diag(s) Vᵗ` with `s` sorted in descending order.
#[derive(Debug, Clone)]
pub struct ThinSvd {
    /// Left singular vectors, n×k.
    pub u: DMatrix<f64>,
    /// Singular values, length k, descending.
    pub s: DVector<f64>,
    /// Right singular vectors, p×k.
    pub v: DMatrix<f64>,
}

impl ThinSvd {
    /// Number of singular triplets, `min(n, p)`.
    pub fn len(&self) -> usize {
        self.s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    pub fn smax(&self) -> f64 {
        self.s[0]
    }

    pub fn smin(&self) -> f64 {
        self.s[self.s.len() - 1]
    }
}

/// Compute the thin SVD of `a`.
///
/// Fails with `SvdFailed` if the iteration does not converge or produces
/// non-finite singular values.
pub fn thin_svd(a: &DMatrix<f64>) -> RidgeResult<ThinSvd> {
    if a.iter().any(|v| !v.is_finite()) {
        return Err(RidgeError::NonFiniteInput("standard-form matrix"));
    }

    let (n, p) = a.shape();
    let k = n.min(p);

    // max_niter = 0 means "iterate until convergence".
    let svd = a
        .clone()
        .try_svd(true, true, f64::EPSILON, 0)
        .ok_or(RidgeError::SvdFailed)?;
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Err(RidgeError::SvdFailed);
    };
    let s = svd.singular_values;
    if s.iter().any(|v| !v.is_finite()) {
        return Err(RidgeError::SvdFailed);
    }

    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&i, &j| s[j].total_cmp(&s[i]));

    Ok(ThinSvd {
        u: DMatrix::from_fn(n, k, |i, j| u[(i, order[j])]),
        s: DVector::from_fn(k, |j, _| s[order[j]]),
        v: DMatrix::from_fn(p, k, |i, j| v_t[(order[j], i)]),
    })
}
