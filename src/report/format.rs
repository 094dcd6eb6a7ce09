//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numerical code stays clean and testable
//! - output changes are localized

use nalgebra::DVector;

use crate::app::pipeline::RunOutput;
use crate::domain::RunConfig;
use crate::ridge::LCurve;

/// Coefficients printed in the summary before eliding the rest.
const MAX_COEFFS_SHOWN: usize = 8;

/// Format the full run summary (problem, selected λ, solution diagnostics).
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let sel = &run.selection;
    let sol = &sel.solution;
    let mut out = String::new();

    out.push_str("=== lcurve - Tikhonov regularization (L-curve) ===\n");
    out.push_str(&format!(
        "Problem: {} | n={} p={} | noise={:.3e} (sigma={:.3e}) | seed={}\n",
        run.problem.kind.display_name(),
        config.rows,
        config.cols,
        config.noise,
        run.problem.noise_sigma,
        config.seed,
    ));
    out.push_str(&format!("Penalty: {}\n", config.penalty.display_name()));
    if let (Some(first), Some(last)) = (sel.curve.reg_param.first(), sel.curve.reg_param.last()) {
        out.push_str(&format!(
            "Curve: {} points | lambda=[{:.3e}, {:.3e}]\n",
            sel.curve.len(),
            last,
            first
        ));
    }

    out.push_str("\nSelection:\n");
    out.push_str(&format!(
        "- corner : {} (index {})\n",
        sel.method.display_name(),
        sel.corner
    ));
    out.push_str(&format!("- lambda : {:.6e}\n", sel.lambda));
    out.push_str(&format!("- rnorm  : {:.6e}\n", sol.residual_norm));
    out.push_str(&format!("- snorm  : {:.6e}\n", sol.solution_norm));
    out.push_str(&format!("- penalty: {:.6e}\n", sol.penalty_norm));
    out.push_str(&format!("- rank   : {}\n", sol.rank));
    if let Some(cov) = &sol.covariance {
        out.push_str(&format!("- trace(cov): {:.6e}\n", cov.trace()));
    }

    out.push_str("\nAccuracy (||c - c_true|| / ||c_true||):\n");
    out.push_str(&format!("- regularized  : {:.4e}\n", run.relative_error));
    out.push_str(&format!("- unregularized: {:.4e}\n", run.unregularized_error));

    out.push_str(&format!("\nCoefficients: {}\n", fmt_vec(&sel.coefficients)));

    out
}

/// Format the L-curve as a table, marking `corner` with `*`.
pub fn format_curve_table(curve: &LCurve, corner: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {:>5} {:>14} {:>14} {:>14}\n",
        "i", "lambda", "rho", "eta"
    ));
    out.push_str(&format!("  {:->5} {:->14} {:->14} {:->14}\n", "", "", "", ""));

    for i in 0..curve.len() {
        let mark = if corner == Some(i) { '*' } else { ' ' };
        out.push_str(&format!(
            "{mark} {:>5} {:>14.6e} {:>14.6e} {:>14.6e}\n",
            i, curve.reg_param[i], curve.rho[i], curve.eta[i]
        ));
    }

    out
}

fn fmt_vec(v: &DVector<f64>) -> String {
    let mut parts: Vec<String> = v
        .iter()
        .take(MAX_COEFFS_SHOWN)
        .map(|x| format!("{x:.6}"))
        .collect();
    if v.len() > MAX_COEFFS_SHOWN {
        parts.push(format!("... ({} more)", v.len() - MAX_COEFFS_SHOWN));
    }
    format!("[{}]", parts.join(", "))
}
