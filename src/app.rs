//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - runs the regularization pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, PlotArgs, SelectArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `lcurve` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Select(args) => handle_select(args, OutputMode::Full),
        Command::Curve(args) => handle_select(args, OutputMode::CurveOnly),
        Command::Plot(args) => handle_plot(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    CurveOnly,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

fn handle_select(args: SelectArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = config_from_args(&args);
    let run = pipeline::run_selection(&config)?;

    if mode == OutputMode::Full {
        println!("{}", crate::report::format_run_summary(&run, &config));
    }

    println!(
        "{}",
        crate::report::format_curve_table(&run.selection.curve, Some(run.selection.corner))
    );

    if mode == OutputMode::Full && config.plot {
        let plot = crate::plot::render_lcurve_plot(
            &run.selection.curve,
            Some(run.selection.corner),
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_curve_csv(path, &run.selection.curve, run.selection.corner)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(path, &run.selection, &config)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::curve::read_curve_json(&args.curve)?;

    println!(
        "{} / {} penalty, {} corner at index {} (lambda = {:.6e})",
        file.problem.display_name(),
        file.penalty.display_name(),
        file.method.display_name(),
        file.corner,
        file.lambda
    );
    let plot = crate::plot::render_lcurve_plot(&file.curve, Some(file.corner), args.width, args.height);

    println!("{plot}");
    Ok(())
}

pub fn config_from_args(args: &SelectArgs) -> RunConfig {
    RunConfig {
        problem: args.problem,
        rows: args.rows,
        cols: args.cols,
        noise: args.noise,
        seed: args.seed,
        blur_sigma: args.blur_sigma,
        penalty: args.penalty,
        points: args.points,
        corner: args.corner,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_plot_overrides_plot() {
        let cli = Cli::parse_from(["lcurve", "select", "--no-plot", "--points", "25"]);
        let Command::Select(args) = cli.command else {
            panic!("expected select");
        };
        let config = config_from_args(&args);
        assert!(!config.plot);
        assert_eq!(config.points, 25);
        assert!(config.export_results.is_none());
    }
}
