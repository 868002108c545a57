//! Command-line interface for Shakedown.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - The validation run itself

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::run_validation;
