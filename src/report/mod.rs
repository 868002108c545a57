//! Rendering and serialization of run results.
//!
//! # Modules
//!
//! - [`console`] - Human-readable rendering grouped by category
//! - [`artifact`] - Machine-readable JSON report artifact
//! - [`theme`] - Terminal styles for the console rendering

pub mod artifact;
pub mod console;
pub mod theme;

pub use artifact::{write_report, ReportArtifact, SystemMetadata};
pub use console::render_report;
pub use theme::Theme;
