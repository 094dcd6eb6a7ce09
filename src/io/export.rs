//! Export the sampled L-curve to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::ridge::LCurve;

/// Write one row per curve point; `corner` is 1 on the selected row, 0 elsewhere.
pub fn write_curve_csv(path: &Path, curve: &LCurve, corner: usize) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "index,lambda,rho,eta,corner")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for i in 0..curve.len() {
        writeln!(
            file,
            "{},{:.12e},{:.12e},{:.12e},{}",
            i,
            curve.reg_param[i],
            curve.rho[i],
            curve.eta[i],
            u8::from(i == corner),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    log::debug!("wrote {} curve rows to {}", curve.len(), path.display());
    Ok(())
}
