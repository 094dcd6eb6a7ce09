//! Reporting utilities: L-curve tables and run summaries.

pub mod format;

pub use format::{format_curve_table, format_run_summary};
