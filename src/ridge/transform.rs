//! Standard-form transform and back-transform.
//!
//! With a penalty matrix `L`, the Tikhonov problem
//!
//! ```text
//! minimize ||y - X c||² + λ² ||L c||²
//! ```
//!
//! becomes a plain ridge problem in `c~ = L c`:
//!
//! ```text
//! minimize ||y - X~ c~||² + λ² ||c~||²,   X~ = X L^{-1}
//! ```
//!
//! The transform writes `X~` into the workspace and factors it. The
//! back-transform maps a standard-form solution `c~` back to `c = L^{-1} c~`.

use nalgebra::{DMatrix, DVector};

use crate::error::{RidgeError, RidgeResult};
use crate::math::PenaltyQr;
use crate::ridge::workspace::RidgeWorkspace;

/// How the penalty `L` is represented.
#[derive(Debug, Clone)]
pub enum Penalty {
    /// `L = diag(weights)`.
    Diagonal(DVector<f64>),
    /// A general square `L`.
    General(DMatrix<f64>),
}

impl Penalty {
    /// Plain ridge: `L = I`.
    pub fn identity(p: usize) -> Self {
        Self::Diagonal(DVector::from_element(p, 1.0))
    }

    /// Number of parameters the penalty acts on.
    pub fn size(&self) -> usize {
        match self {
            Self::Diagonal(weights) => weights.len(),
            Self::General(l) => l.ncols(),
        }
    }
}

/// What the back-transform needs to undo a standard-form transform.
#[derive(Debug, Clone)]
pub enum PenaltyTransform {
    Diagonal(DVector<f64>),
    General(PenaltyQr),
}

impl PenaltyTransform {
    /// Map a standard-form solution back: `c = L^{-1} c~`.
    pub fn back_transform(
        &self,
        c_tilde: &DVector<f64>,
        work: &RidgeWorkspace,
    ) -> RidgeResult<DVector<f64>> {
        match self {
            Self::Diagonal(weights) => back_transform_diagonal(weights, c_tilde, work),
            Self::General(qr) => back_transform_general(qr, c_tilde, work),
        }
    }

    /// Map an original-form vector to standard form: `c~ = L c`.
    pub fn forward(&self, c: &DVector<f64>) -> DVector<f64> {
        match self {
            Self::Diagonal(weights) => c.component_mul(weights),
            Self::General(qr) => qr.apply(c),
        }
    }
}

/// Transform `X` to standard form for either penalty representation.
pub fn standard_form(
    x: &DMatrix<f64>,
    penalty: &Penalty,
    work: &mut RidgeWorkspace,
) -> RidgeResult<PenaltyTransform> {
    match penalty {
        Penalty::Diagonal(weights) => {
            standard_form_diagonal(x, weights, work)?;
            Ok(PenaltyTransform::Diagonal(weights.clone()))
        }
        Penalty::General(l) => standard_form_general(x, l, work).map(PenaltyTransform::General),
    }
}

/// Standard form for `L = diag(weights)`: `X~[:, j] = X[:, j] / weights[j]`.
pub fn standard_form_diagonal(
    x: &DMatrix<f64>,
    weights: &DVector<f64>,
    work: &mut RidgeWorkspace,
) -> RidgeResult<()> {
    check_penalty_len(weights.len(), work)?;
    work.check_design(x)?;
    work.invalidate();
    check_weights(weights)?;

    let a = work.begin_transform();
    for (j, &lj) in weights.iter().enumerate() {
        let mut col = a.column_mut(j);
        col.copy_from(&x.column(j));
        col /= lj;
    }

    work.factorize()
}

/// Standard form for a general square `L`, through its QR factorization.
///
/// Returns the factorization; the back-transform needs it.
pub fn standard_form_general(
    x: &DMatrix<f64>,
    l: &DMatrix<f64>,
    work: &mut RidgeWorkspace,
) -> RidgeResult<PenaltyQr> {
    let (rows, cols) = l.shape();
    if rows != cols {
        return Err(RidgeError::NotSquare { rows, cols });
    }
    if rows != work.p() {
        return Err(RidgeError::ShapeMismatch {
            what: "L matrix",
            rows,
            cols,
            expected_rows: work.p(),
            expected_cols: work.p(),
        });
    }
    work.check_design(x)?;

    // Any failure past this point must leave the workspace stale.
    work.invalidate();
    let qr = PenaltyQr::decompose(l)?;
    let x_tilde = qr.right_divide(x)?;
    work.begin_transform().copy_from(&x_tilde);
    work.factorize()?;

    Ok(qr)
}

/// `c = c~ ./ weights`.
pub fn back_transform_diagonal(
    weights: &DVector<f64>,
    c_tilde: &DVector<f64>,
    work: &RidgeWorkspace,
) -> RidgeResult<DVector<f64>> {
    check_penalty_len(weights.len(), work)?;
    check_solution_len(c_tilde.len(), work)?;
    check_weights(weights)?;

    Ok(c_tilde.component_div(weights))
}

/// Solve `L c = c~` with the factorization from [`standard_form_general`].
pub fn back_transform_general(
    qr: &PenaltyQr,
    c_tilde: &DVector<f64>,
    work: &RidgeWorkspace,
) -> RidgeResult<DVector<f64>> {
    let p = work.p();
    if qr.dim() != p {
        return Err(RidgeError::ShapeMismatch {
            what: "QR matrix",
            rows: qr.dim(),
            cols: qr.dim(),
            expected_rows: p,
            expected_cols: p,
        });
    }
    check_solution_len(c_tilde.len(), work)?;

    qr.solve(c_tilde)
}

fn check_penalty_len(len: usize, work: &RidgeWorkspace) -> RidgeResult<()> {
    if len != work.p() {
        return Err(RidgeError::LengthMismatch {
            what: "L vector",
            expected: work.p(),
            actual: len,
        });
    }
    Ok(())
}

fn check_solution_len(len: usize, work: &RidgeWorkspace) -> RidgeResult<()> {
    if len != work.p() {
        return Err(RidgeError::LengthMismatch {
            what: "c vector",
            expected: work.p(),
            actual: len,
        });
    }
    Ok(())
}

fn check_weights(weights: &DVector<f64>) -> RidgeResult<()> {
    match weights
        .iter()
        .enumerate()
        .find(|&(_, &w)| w == 0.0 || !w.is_finite())
    {
        Some((index, &value)) => Err(RidgeError::InvalidPenaltyWeight { index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn design() -> DMatrix<f64> {
        DMatrix::from_row_slice(5, 3, &[
            1.0, 0.5, 0.2, //
            0.3, 1.2, -0.4, //
            2.0, -0.1, 0.9, //
            0.0, 0.7, 1.1, //
            -0.6, 0.4, 0.3,
        ])
    }

    fn random_vector(rng: &mut StdRng, p: usize) -> DVector<f64> {
        DVector::from_fn(p, |_, _| rng.gen_range(-5.0..5.0))
    }

    fn difference_penalty() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[
            1.0, -1.0, 0.0, //
            0.0, 1.0, -1.0, //
            0.0, 0.0, 1.0,
        ])
    }

    #[test]
    fn diagonal_transform_scales_columns() {
        let x = design();
        let weights = DVector::from_row_slice(&[2.0, 0.5, 4.0]);
        let mut ws = RidgeWorkspace::new(5, 3).unwrap();
        standard_form_diagonal(&x, &weights, &mut ws).unwrap();

        assert!(ws.is_valid());
        for j in 0..3 {
            for i in 0..5 {
                assert!((ws.standard_form()[(i, j)] - x[(i, j)] / weights[j]).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn zero_weight_is_a_domain_error_and_leaves_workspace_stale() {
        let x = design();
        let mut ws = RidgeWorkspace::new(5, 3).unwrap();
        standard_form_diagonal(&x, &DVector::from_element(3, 1.0), &mut ws).unwrap();
        assert!(ws.is_valid());

        let weights = DVector::from_row_slice(&[1.0, 0.0, 1.0]);
        let err = standard_form_diagonal(&x, &weights, &mut ws).unwrap_err();
        assert_eq!(err, RidgeError::InvalidPenaltyWeight { index: 1, value: 0.0 });
        assert_eq!(err.kind(), ErrorKind::Domain);

        assert!(!ws.is_valid());
        assert!(ws.standard_form().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn general_transform_matches_explicit_inverse() {
        let x = design();
        let l = difference_penalty();
        let mut ws = RidgeWorkspace::new(5, 3).unwrap();
        standard_form_general(&x, &l, &mut ws).unwrap();

        let expected = &x * l.try_inverse().unwrap();
        assert!((ws.standard_form() - expected).norm() < 1e-12);
    }

    #[test]
    fn general_transform_rejects_bad_shapes() {
        let x = design();
        let mut ws = RidgeWorkspace::new(5, 3).unwrap();

        let err = standard_form_general(&x, &DMatrix::zeros(3, 2), &mut ws).unwrap_err();
        assert_eq!(err, RidgeError::NotSquare { rows: 3, cols: 2 });

        let err = standard_form_general(&x, &DMatrix::identity(4, 4), &mut ws).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn singular_general_penalty_leaves_workspace_stale() {
        let x = design();
        let mut ws = RidgeWorkspace::new(5, 3).unwrap();
        standard_form_general(&x, &difference_penalty(), &mut ws).unwrap();

        let mut l = difference_penalty();
        l[(2, 2)] = 0.0;
        let err = standard_form_general(&x, &l, &mut ws).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Singular);
        assert!(!ws.is_valid());
    }

    #[test]
    fn diagonal_round_trip() {
        let x = design();
        let weights = DVector::from_row_slice(&[0.25, 3.0, -2.0]);
        let mut ws = RidgeWorkspace::new(5, 3).unwrap();
        let transform = standard_form(&x, &Penalty::Diagonal(weights), &mut ws).unwrap();

        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..20 {
            let c_tilde = random_vector(&mut rng, 3);
            let c = transform.back_transform(&c_tilde, &ws).unwrap();
            assert!((transform.forward(&c) - &c_tilde).norm() < 1e-13);

            // Same fitted values in both parameterizations.
            let fitted = &x * &c;
            let fitted_tilde = ws.standard_form() * &c_tilde;
            assert!((fitted - fitted_tilde).norm() < 1e-12);
        }
    }

    #[test]
    fn general_round_trip() {
        let x = design();
        let mut ws = RidgeWorkspace::new(5, 3).unwrap();
        let transform =
            standard_form(&x, &Penalty::General(difference_penalty()), &mut ws).unwrap();

        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..20 {
            let c_tilde = random_vector(&mut rng, 3);
            let c = transform.back_transform(&c_tilde, &ws).unwrap();
            assert!((transform.forward(&c) - &c_tilde).norm() < 1e-11);

            let fitted = &x * &c;
            let fitted_tilde = ws.standard_form() * &c_tilde;
            assert!((fitted - fitted_tilde).norm() < 1e-11);
        }
    }

    #[test]
    fn back_transform_rechecks_weights_and_lengths() {
        let ws = RidgeWorkspace::new(5, 3).unwrap();
        let c = DVector::from_element(3, 1.0);

        let err = back_transform_diagonal(&DVector::from_row_slice(&[1.0, 1.0, 0.0]), &c, &ws)
            .unwrap_err();
        assert!(matches!(err, RidgeError::InvalidPenaltyWeight { index: 2, .. }));

        let err =
            back_transform_diagonal(&DVector::from_element(3, 1.0), &DVector::zeros(2), &ws)
                .unwrap_err();
        assert_eq!(
            err,
            RidgeError::LengthMismatch { what: "c vector", expected: 3, actual: 2 }
        );
    }
}
