//! Read/write L-curve JSON files.
//!
//! Curve JSON is the "portable" representation of a selection run:
//! - the sampled curve (λ, rho, eta per point)
//! - the chosen corner and λ
//! - run metadata (problem, sizes, noise, seed, penalty)
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurveFile, RunConfig};
use crate::error::AppError;
use crate::ridge::RidgeSelection;

/// Build the on-disk record for a selection run.
pub fn curve_file(selection: &RidgeSelection, config: &RunConfig) -> CurveFile {
    CurveFile {
        tool: "lcurve".to_string(),
        generated: Utc::now(),
        problem: config.problem,
        rows: config.rows,
        cols: config.cols,
        noise: config.noise,
        seed: config.seed,
        penalty: config.penalty,
        method: selection.method,
        corner: selection.corner,
        lambda: selection.lambda,
        curve: selection.curve.clone(),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, selection: &RidgeSelection, config: &RunConfig) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &curve_file(selection, config))
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    log::debug!("wrote curve JSON to {}", path.display());
    Ok(())
}

/// Read a curve JSON file.
///
/// The three curve vectors must have equal length and the corner must index
/// into them.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;

    let n = curve.curve.reg_param.len();
    if curve.curve.rho.len() != n || curve.curve.eta.len() != n {
        return Err(AppError::new(
            2,
            format!(
                "Invalid curve JSON: vector lengths differ (lambda={}, rho={}, eta={}).",
                n,
                curve.curve.rho.len(),
                curve.curve.eta.len()
            ),
        ));
    }
    if curve.corner >= n {
        return Err(AppError::new(
            2,
            format!("Invalid curve JSON: corner index {} out of range (n={n}).", curve.corner),
        ));
    }

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::domain::{PenaltyKind, ProblemKind};
    use crate::ridge::CornerMethod;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lcurve_{}_{name}", std::process::id()))
    }

    fn config() -> RunConfig {
        RunConfig {
            problem: ProblemKind::Blur,
            rows: 16,
            cols: 12,
            noise: 1e-2,
            seed: 11,
            blur_sigma: 0.05,
            penalty: PenaltyKind::Difference,
            points: 20,
            corner: CornerMethod::LogLog,
            plot: false,
            plot_width: 60,
            plot_height: 20,
            export_results: None,
            export_curve: None,
        }
    }

    #[test]
    fn selection_survives_a_file_round_trip() {
        let cfg = config();
        let run = crate::app::pipeline::run_selection(&cfg).unwrap();
        let path = temp_path("roundtrip.json");

        write_curve_json(&path, &run.selection, &cfg).unwrap();
        let back = read_curve_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back.tool, "lcurve");
        assert_eq!(back.penalty, PenaltyKind::Difference);
        assert_eq!(back.corner, run.selection.corner);
        assert_eq!(back.curve.len(), run.selection.curve.len());

        let close = |a: f64, b: f64| (a - b).abs() <= 1e-14 * b.abs();
        assert!(close(back.lambda, run.selection.lambda));
        for (a, b) in back.curve.eta.iter().zip(&run.selection.curve.eta) {
            assert!(close(*a, *b));
        }
    }

    #[test]
    fn inconsistent_curve_is_rejected() {
        let cfg = config();
        let run = crate::app::pipeline::run_selection(&cfg).unwrap();
        let mut file = curve_file(&run.selection, &cfg);
        file.curve.eta.pop();

        let path = temp_path("inconsistent.json");
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();
        let err = read_curve_json(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("lengths differ"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_curve_json(&temp_path("does_not_exist.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
