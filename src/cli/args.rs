//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Validation is a single
//! invocation with no required arguments, so there are no subcommands.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Shakedown - Development environment readiness validation.
#[derive(Debug, Parser)]
#[command(name = "shakedown")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to write the JSON validation report
    #[arg(short, long, default_value = "validation-report.json")]
    pub report: PathBuf,

    /// Print the JSON report to stdout instead of the console rendering
    #[arg(long)]
    pub json: bool,

    /// Minimal output (summary only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Timeout in seconds for external command probes
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
