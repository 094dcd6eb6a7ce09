//! QR factorization of a square Tikhonov penalty matrix.
//!
//! The factorization is returned as an owned value so the caller's penalty
//! matrix is never overwritten. It supports the three operations the
//! standard-form transform needs:
//!
//! ```text
//! X L^{-1} = X R^{-1} Qᵗ   (row i:  Q · (Rᵗ \ x_i))
//! L^{-1} b = R \ (Qᵗ b)
//! L x      = Q (R x)
//! ```

use nalgebra::{DMatrix, DVector};

use crate::error::{RidgeError, RidgeResult};

/// `L = Q R` for a nonsingular square `L`.
#[derive(Debug, Clone)]
pub struct PenaltyQr {
    q: DMatrix<f64>,
    r: DMatrix<f64>,
}

impl PenaltyQr {
    /// Factor `l`.
    ///
    /// Fails with `NotSquare` for a rectangular `l` and `SingularPenalty` when a
    /// pivot `R[j, j]` is zero or negligible relative to `||l[:, j]||`, i.e.
    /// column `j` lies (numerically) in the span of the columns before it.
    /// The test is per column, so a well-posed `l` with columns of very
    /// different scale is accepted.
    pub fn decompose(l: &DMatrix<f64>) -> RidgeResult<Self> {
        let (rows, cols) = l.shape();
        if rows != cols {
            return Err(RidgeError::NotSquare { rows, cols });
        }
        if rows == 0 {
            return Err(RidgeError::EmptyWorkspace { n: rows, p: cols });
        }
        if l.iter().any(|v| !v.is_finite()) {
            return Err(RidgeError::NonFiniteInput("penalty matrix"));
        }

        let qr = l.clone().qr();
        let out = Self { q: qr.q(), r: qr.r() };

        let rel = rows as f64 * f64::EPSILON;
        if let Some((index, value)) = out
            .r
            .diagonal()
            .iter()
            .map(|v| v.abs())
            .enumerate()
            .find(|&(j, v)| v <= rel * l.column(j).norm())
        {
            return Err(RidgeError::SingularPenalty { index, value });
        }

        Ok(out)
    }

    pub fn dim(&self) -> usize {
        self.r.nrows()
    }

    pub fn q(&self) -> &DMatrix<f64> {
        &self.q
    }

    pub fn r(&self) -> &DMatrix<f64> {
        &self.r
    }

    /// Compute `L x`.
    pub fn apply(&self, x: &DVector<f64>) -> DVector<f64> {
        &self.q * (&self.r * x)
    }

    /// Solve `L x = b`.
    pub fn solve(&self, b: &DVector<f64>) -> RidgeResult<DVector<f64>> {
        let qtb = self.q.tr_mul(b);
        self.r
            .solve_upper_triangular(&qtb)
            .ok_or_else(|| self.pivot_error())
    }

    /// Compute `X L^{-1}` row by row: solve `Rᵗ z = x_i`, then form `Q z`.
    pub fn right_divide(&self, x: &DMatrix<f64>) -> RidgeResult<DMatrix<f64>> {
        let z = self
            .r
            .tr_solve_upper_triangular(&x.transpose())
            .ok_or_else(|| self.pivot_error())?;
        Ok((&self.q * z).transpose())
    }

    fn pivot_error(&self) -> RidgeError {
        let (index, value) = self
            .r
            .diagonal()
            .iter()
            .map(|v| v.abs())
            .enumerate()
            .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best });
        RidgeError::SingularPenalty { index, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_penalty() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[
            2.0, -1.0, 0.0, //
            0.5, 3.0, -1.0, //
            0.0, 1.0, 1.5,
        ])
    }

    #[test]
    fn solve_inverts_apply() {
        let qr = PenaltyQr::decompose(&sample_penalty()).unwrap();
        let x = DVector::from_row_slice(&[0.3, -1.2, 2.0]);
        let back = qr.solve(&qr.apply(&x)).unwrap();
        assert!((back - x).norm() < 1e-12);
    }

    #[test]
    fn right_divide_matches_explicit_inverse() {
        let l = sample_penalty();
        let qr = PenaltyQr::decompose(&l).unwrap();
        let x = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, -1.0, 0.0, 4.0]);

        let expected = &x * l.clone().try_inverse().unwrap();
        let got = qr.right_divide(&x).unwrap();
        assert!((got - expected).norm() < 1e-12);
    }

    #[test]
    fn rectangular_penalty_is_rejected() {
        let l = DMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            PenaltyQr::decompose(&l).unwrap_err(),
            RidgeError::NotSquare { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn widely_scaled_penalty_is_accepted() {
        let l = DMatrix::from_diagonal(&DVector::from_row_slice(&[1e16, 1.0, 1.0]));
        let qr = PenaltyQr::decompose(&l).unwrap();

        let b = DVector::from_row_slice(&[2e16, 3.0, -4.0]);
        let x = qr.solve(&b).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert!((x[2] + 4.0).abs() < 1e-12);
    }

    #[test]
    fn zero_column_penalty_is_singular() {
        let mut l = DMatrix::identity(3, 3);
        l[(2, 2)] = 0.0;
        assert!(matches!(
            PenaltyQr::decompose(&l),
            Err(RidgeError::SingularPenalty { index: 2, .. })
        ));
    }

    #[test]
    fn rank_deficient_penalty_is_singular() {
        // Third column is the sum of the first two.
        let l = DMatrix::from_row_slice(3, 3, &[
            1.0, 0.0, 1.0, //
            0.0, 1.0, 1.0, //
            1.0, 1.0, 2.0,
        ]);
        assert!(matches!(
            PenaltyQr::decompose(&l),
            Err(RidgeError::SingularPenalty { .. })
        ));
    }
}
