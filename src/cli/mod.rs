//! Command-line parsing for the L-curve regularization tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{PenaltyKind, ProblemKind};
use crate::ridge::CornerMethod;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "lcurve",
    version,
    about = "Tikhonov regularization with L-curve parameter selection"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a test problem, pick λ at the L-curve corner, and report the fit.
    Select(SelectArgs),
    /// Print the L-curve table only (useful for scripting).
    Curve(SelectArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Problem and selection options.
#[derive(Debug, Parser, Clone)]
pub struct SelectArgs {
    /// Test problem to generate.
    #[arg(long, value_enum, default_value_t = ProblemKind::Blur)]
    pub problem: ProblemKind,

    /// Number of observations (rows of X).
    #[arg(short = 'n', long, default_value_t = 64)]
    pub rows: usize,

    /// Number of parameters (columns of X).
    #[arg(short = 'p', long, default_value_t = 48)]
    pub cols: usize,

    /// Noise level relative to the RMS of the exact data.
    #[arg(long, default_value_t = 0.01)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Kernel width for the blur problem.
    #[arg(long, default_value_t = 0.03)]
    pub blur_sigma: f64,

    /// Tikhonov penalty matrix.
    #[arg(long, value_enum, default_value_t = PenaltyKind::Identity)]
    pub penalty: PenaltyKind,

    /// Number of points on the L-curve (>= 3).
    #[arg(long, default_value_t = 100)]
    pub points: usize,

    /// Corner detection method.
    #[arg(long, value_enum, default_value_t = CornerMethod::LogLog)]
    pub corner: CornerMethod,

    /// Render an ASCII plot of the L-curve (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,

    /// Export the L-curve to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the L-curve (with run metadata) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `lcurve select --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,
}
