//! L-curve corner detection.
//!
//! For every three consecutive points the circle through them is computed and
//! its radius is taken as the inverse curvature at the middle point. The
//! corner is the middle point of the triple with the smallest radius.
//!
//! Nearly colinear triples give a non-finite radius (the doubled triangle area
//! in the denominator vanishes) and are skipped rather than read as a corner.
//!
//! Two parameterizations are supported:
//! - `(log ρ, log η)`: the classic L-curve (Hansen & O'Leary, 1993)
//! - `(λ², η²)`: the variant of Rezghi & Hosseini, "A new variant of L-curve
//!   for Tikhonov regularization", J. Comp. App. Math. 231 (2009)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{RidgeError, RidgeResult};
use crate::ridge::lcurve::{LCurve, MIN_LCURVE_POINTS};

/// Which parameterization to search for the corner in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CornerMethod {
    /// `(log ρ, log η)`.
    LogLog,
    /// `(λ², η²)`.
    Squared,
}

impl CornerMethod {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::LogLog => "log-log",
            Self::Squared => "squared",
        }
    }

    /// Locate the corner of `curve` with this method.
    pub fn locate(self, curve: &LCurve) -> RidgeResult<usize> {
        match self {
            Self::LogLog => lcorner(&curve.rho, &curve.eta),
            Self::Squared => lcorner_squared(&curve.reg_param, &curve.eta),
        }
    }
}

/// Index of maximum curvature of `(log ρ_i, log η_i)`.
pub fn lcorner(rho: &[f64], eta: &[f64]) -> RidgeResult<usize> {
    check_points(rho.len(), eta.len(), "eta vector")?;
    sharpest_bend(rho.len(), |i| (rho[i].ln(), eta[i].ln()))
}

/// Index of maximum curvature of `(λ_i², η_i²)`.
pub fn lcorner_squared(reg_param: &[f64], eta: &[f64]) -> RidgeResult<usize> {
    check_points(reg_param.len(), eta.len(), "eta vector")?;
    sharpest_bend(reg_param.len(), |i| {
        (reg_param[i] * reg_param[i], eta[i] * eta[i])
    })
}

/// Radius of the circle through three points.
///
/// Infinite or NaN when the points are colinear or coincide.
pub fn circumradius(p1: (f64, f64), p2: (f64, f64), p3: (f64, f64)) -> f64 {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    let (x3, y3) = p3;

    let x21 = x2 - x1;
    let y21 = y2 - y1;
    let x31 = x3 - x1;
    let y31 = y3 - y1;
    let x32 = x3 - x2;
    let y32 = y3 - y2;

    let h21 = x21 * x21 + y21 * y21;
    let h31 = x31 * x31 + y31 * y31;
    let h32 = x32 * x32 + y32 * y32;
    let d = (2.0 * (x21 * y31 - x31 * y21)).abs();

    (h21 * h31 * h32).sqrt() / d
}

fn check_points(n: usize, other: usize, what: &'static str) -> RidgeResult<()> {
    if n < MIN_LCURVE_POINTS {
        return Err(RidgeError::TooFewPoints(n));
    }
    if other != n {
        return Err(RidgeError::LengthMismatch {
            what,
            expected: n,
            actual: other,
        });
    }
    Ok(())
}

fn sharpest_bend(n: usize, point: impl Fn(usize) -> (f64, f64)) -> RidgeResult<usize> {
    let mut best: Option<(usize, f64)> = None;

    let mut prev = point(0);
    let mut cur = point(1);
    for i in 1..n - 1 {
        let next = point(i + 1);
        let r = circumradius(prev, cur, next);

        if r.is_finite() && best.is_none_or(|(_, rmin)| r < rmin) {
            best = Some((i, r));
        }

        prev = cur;
        cur = next;
    }

    match best {
        Some((idx, rmin)) => {
            log::debug!("L-curve corner at index {idx} (radius {rmin:.6e})");
            Ok(idx)
        }
        None => Err(RidgeError::NoCorner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_circle_radius() {
        let r = circumradius((1.0, 0.0), (0.0, 1.0), (-1.0, 0.0));
        assert!((r - 1.0).abs() < 1e-15);
    }

    #[test]
    fn colinear_radius_is_not_finite() {
        assert!(!circumradius((0.0, 0.0), (1.0, 1.0), (2.0, 2.0)).is_finite());
        assert!(!circumradius((1.0, 1.0), (1.0, 1.0), (1.0, 1.0)).is_finite());
    }

    #[test]
    fn finds_single_sharp_bend_among_gentle_ones() {
        // Log-space polyline: slopes -10, -9, -8 on the steep arm, then
        // -0.1, -0.12, -0.14 on the flat arm. Unit steps in log ρ.
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [30.0, 20.0, 11.0, 3.0, 2.9, 2.78, 2.64];
        let rho: Vec<f64> = xs.iter().map(|x: &f64| x.exp()).collect();
        let eta: Vec<f64> = ys.iter().map(|y: &f64| y.exp()).collect();

        assert_eq!(lcorner(&rho, &eta).unwrap(), 3);
    }

    #[test]
    fn seven_point_example_selects_tightest_circle() {
        let eta: [f64; 7] = [100.0, 90.0, 80.0, 10.0, 9.0, 8.0, 7.0];
        let rho: [f64; 7] = [1.0, 2.0, 3.0, 4.0, 40.0, 41.0, 42.0];

        // Radii of the interior triples, in order:
        // 4.263, 1.262, 1.723, 1.207, 4.554.
        let pts: Vec<(f64, f64)> = rho.iter().zip(eta.iter()).map(|(r, e)| (r.ln(), e.ln())).collect();
        let r3 = circumradius(pts[2], pts[3], pts[4]);
        let r4 = circumradius(pts[3], pts[4], pts[5]);
        assert!(r4 < r3);

        assert_eq!(lcorner(&rho, &eta).unwrap(), 4);
    }

    #[test]
    fn colinear_log_points_are_degenerate() {
        // log η = log ρ: every triple lies on one line.
        let rho: Vec<f64> = (1..=8).map(|i| i as f64).collect();
        let eta = rho.clone();
        assert_eq!(lcorner(&rho, &eta).unwrap_err(), RidgeError::NoCorner);

        // Flat curve.
        let eta = vec![5.0; rho.len()];
        assert_eq!(lcorner(&rho, &eta).unwrap_err(), RidgeError::NoCorner);
    }

    #[test]
    fn squared_variant_uses_lambda_and_eta_squared() {
        // Points (λ², η²): right angle at index 2.
        let reg_param: Vec<f64> = [4.0_f64, 3.0, 2.0, 2.0, 2.0].iter().map(|v| v.sqrt()).collect();
        let eta: Vec<f64> = [1.0_f64, 1.0, 1.0, 2.0, 3.0].iter().map(|v| v.sqrt()).collect();
        assert_eq!(lcorner_squared(&reg_param, &eta).unwrap(), 2);
    }

    #[test]
    fn too_few_or_mismatched_points() {
        assert_eq!(lcorner(&[1.0, 2.0], &[2.0, 1.0]).unwrap_err(), RidgeError::TooFewPoints(2));
        assert!(matches!(
            lcorner(&[1.0, 2.0, 3.0], &[3.0, 2.0]),
            Err(RidgeError::LengthMismatch { .. })
        ));
        assert_eq!(
            lcorner_squared(&[], &[]).unwrap_err(),
            RidgeError::TooFewPoints(0)
        );
    }

    #[test]
    fn method_dispatch() {
        let curve = LCurve {
            reg_param: vec![3.0, 2.0, 1.0, 0.5],
            rho: vec![4.0, 3.0, 2.0, 1.0],
            eta: vec![1.0, 1.5, 10.0, 50.0],
        };
        assert!(CornerMethod::LogLog.locate(&curve).is_ok());
        assert!(CornerMethod::Squared.locate(&curve).is_ok());
    }
}
