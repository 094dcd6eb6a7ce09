//! Caller-owned scratch space for a regularized least-squares problem.
//!
//! A workspace is sized once for an `n × p` design matrix and then reused for
//! every transform, solve, and L-curve evaluation of that problem.
//!
//! The cached SVD of the standard-form matrix is only valid after a successful
//! transform. Starting a new transform marks it stale, and it stays stale if the
//! transform fails; readers check the flag and return `StaleFactorization`
//! instead of silently using an old factorization.

use nalgebra::{DMatrix, DVector};

use crate::error::{RidgeError, RidgeResult};
use crate::math::{ThinSvd, thin_svd};

#[derive(Debug, Clone)]
pub struct RidgeWorkspace {
    n: usize,
    p: usize,
    /// Standard-form matrix `X~ = X L^{-1}`.
    a: DMatrix<f64>,
    /// SVD of `a`; `None` while stale.
    svd: Option<ThinSvd>,
    /// Column scaling. Regularized problems are never balanced, so this stays all ones.
    scale: DVector<f64>,
    /// `V diag(f)`, used to form covariances.
    qsi: DMatrix<f64>,
    /// Projection `Uᵗ y`.
    xt: DVector<f64>,
    /// Filtered projection `f ⊙ Uᵗ y`.
    filtered: DVector<f64>,
    /// Length-n scratch for the out-of-range residual `y - U Uᵗ y`.
    resid: DVector<f64>,
}

impl RidgeWorkspace {
    pub fn new(n: usize, p: usize) -> RidgeResult<Self> {
        if n == 0 || p == 0 {
            return Err(RidgeError::EmptyWorkspace { n, p });
        }
        let k = n.min(p);
        Ok(Self {
            n,
            p,
            a: DMatrix::zeros(n, p),
            svd: None,
            scale: DVector::from_element(p, 1.0),
            qsi: DMatrix::zeros(p, k),
            xt: DVector::zeros(k),
            filtered: DVector::zeros(k),
            resid: DVector::zeros(n),
        })
    }

    /// Number of observations.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of parameters.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Number of singular directions, `min(n, p)`.
    pub fn k(&self) -> usize {
        self.n.min(self.p)
    }

    /// Whether the cached factorization matches the current standard-form matrix.
    pub fn is_valid(&self) -> bool {
        self.svd.is_some()
    }

    /// Drop the cached factorization.
    pub fn invalidate(&mut self) {
        self.svd = None;
    }

    pub fn standard_form(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn svd(&self) -> RidgeResult<&ThinSvd> {
        self.svd.as_ref().ok_or(RidgeError::StaleFactorization)
    }

    pub fn singular_values(&self) -> RidgeResult<&DVector<f64>> {
        Ok(&self.svd()?.s)
    }

    pub fn scale(&self) -> &DVector<f64> {
        &self.scale
    }

    /// Check `x` against the workspace shape.
    pub(crate) fn check_design(&self, x: &DMatrix<f64>) -> RidgeResult<()> {
        if x.shape() != (self.n, self.p) {
            return Err(RidgeError::ShapeMismatch {
                what: "X matrix",
                rows: x.nrows(),
                cols: x.ncols(),
                expected_rows: self.n,
                expected_cols: self.p,
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(RidgeError::NonFiniteInput("X matrix"));
        }
        Ok(())
    }

    pub(crate) fn check_rhs(&self, y: &DVector<f64>) -> RidgeResult<()> {
        if y.len() != self.n {
            return Err(RidgeError::LengthMismatch {
                what: "y vector",
                expected: self.n,
                actual: y.len(),
            });
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(RidgeError::NonFiniteInput("y vector"));
        }
        Ok(())
    }

    /// Mutable access to the standard-form matrix. Marks the factorization stale.
    pub(crate) fn begin_transform(&mut self) -> &mut DMatrix<f64> {
        self.svd = None;
        &mut self.a
    }

    /// Factor the standard-form matrix, without column balancing.
    pub(crate) fn factorize(&mut self) -> RidgeResult<()> {
        self.scale.fill(1.0);
        let svd = thin_svd(&self.a)?;
        log::debug!(
            "standard-form SVD: n={} p={} smax={:.6e} smin={:.6e}",
            self.n,
            self.p,
            svd.smax(),
            svd.smin()
        );
        self.svd = Some(svd);
        Ok(())
    }

    /// Compute `xt = Uᵗ y` into the workspace.
    pub(crate) fn project(&mut self, y: &DVector<f64>) -> RidgeResult<()> {
        let svd = self.svd.as_ref().ok_or(RidgeError::StaleFactorization)?;
        self.xt.gemv_tr(1.0, &svd.u, y, 0.0);
        Ok(())
    }

    /// Norm of the part of `y` outside the column space of `U`.
    ///
    /// Call after [`project`](Self::project) with the same `y`.
    pub(crate) fn out_of_range_norm(&mut self, y: &DVector<f64>) -> RidgeResult<f64> {
        let svd = self.svd.as_ref().ok_or(RidgeError::StaleFactorization)?;
        self.resid.copy_from(y);
        self.resid.gemv(-1.0, &svd.u, &self.xt, 1.0);
        Ok(self.resid.norm())
    }

    pub(crate) fn restore_scale(&mut self) {
        self.scale.fill(1.0);
    }

    /// Split borrows used by the solver: `(svd, xt, filtered, qsi)`.
    pub(crate) fn solver_parts(
        &mut self,
    ) -> RidgeResult<(&ThinSvd, &DVector<f64>, &mut DVector<f64>, &mut DMatrix<f64>)> {
        let svd = self.svd.as_ref().ok_or(RidgeError::StaleFactorization)?;
        Ok((svd, &self.xt, &mut self.filtered, &mut self.qsi))
    }

    /// Shared view of the SVD and the current projection.
    pub(crate) fn projection(&self) -> RidgeResult<(&ThinSvd, &DVector<f64>)> {
        Ok((self.svd()?, &self.xt))
    }
}
