//! ASCII plotting of the L-curve for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Axes are `log10(rho)` (x) and `log10(eta)` (y). Plot elements:
//! - curve points: `o`
//! - segments between consecutive points: `.`
//! - selected corner: `X`

use crate::ridge::LCurve;

/// Render the L-curve on a `width × height` character grid.
///
/// Points with a non-positive or non-finite norm cannot be placed on log axes
/// and are skipped.
pub fn render_lcurve_plot(curve: &LCurve, corner: Option<usize>, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points: Vec<(usize, f64, f64)> = curve
        .rho
        .iter()
        .zip(curve.eta.iter())
        .enumerate()
        .filter_map(|(i, (&r, &e))| {
            let (x, y) = (r.log10(), e.log10());
            (x.is_finite() && y.is_finite()).then_some((i, x, y))
        })
        .collect();

    let (x_min, x_max) = range(points.iter().map(|p| p.1)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = range(points.iter().map(|p| p.2)).unwrap_or((0.0, 1.0));
    let (x_min, x_max) = pad_range(x_min, x_max, 0.05);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    let cells: Vec<(usize, usize, usize)> = points
        .iter()
        .map(|&(i, x, y)| {
            (
                i,
                map_x(x, x_min, x_max, width),
                map_y(y, y_min, y_max, height),
            )
        })
        .collect();

    // Segments first so points can overlay.
    for pair in cells.windows(2) {
        let (_, x0, y0) = pair[0];
        let (_, x1, y1) = pair[1];
        draw_line(&mut grid, x0, y0, x1, y1, '.');
    }
    for &(i, x, y) in &cells {
        grid[y][x] = if corner == Some(i) { 'X' } else { 'o' };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: log10(rho)=[{x_min:.3}, {x_max:.3}] | log10(eta)=[{y_min:.3}, {y_max:.3}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let curve = LCurve {
            reg_param: vec![1.0, 0.1, 0.01],
            rho: vec![1.0, 10.0, 1000.0],
            eta: vec![1000.0, 10.0, 1.0],
        };

        let txt = render_lcurve_plot(&curve, Some(1), 10, 5);
        let expected = concat!(
            "Plot: log10(rho)=[-0.150, 3.150] | log10(eta)=[-0.150, 3.150]\n",
            "o         \n",
            " .        \n",
            "  .       \n",
            "   X..    \n",
            "      ...o\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn non_positive_norms_are_skipped() {
        let curve = LCurve {
            reg_param: vec![1.0, 0.5, 0.25],
            rho: vec![0.0, 1.0, 2.0],
            eta: vec![1.0, 1.0, 0.5],
        };
        let txt = render_lcurve_plot(&curve, Some(0), 12, 6);
        let body: String = txt.lines().skip(1).collect();
        assert!(!body.contains('X'));
        assert_eq!(body.matches('o').count(), 2);
    }

    #[test]
    fn empty_curve_renders_blank_grid() {
        let curve = LCurve {
            reg_param: vec![],
            rho: vec![],
            eta: vec![],
        };
        let txt = render_lcurve_plot(&curve, None, 3, 2);
        // Clamped to the minimum grid size.
        assert_eq!(txt.lines().count(), 1 + 5);
        assert!(txt.lines().skip(1).all(|l| l.len() == 10 && l.trim().is_empty()));
    }
}
