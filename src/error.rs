//! Error types for Shakedown operations.
//!
//! This module defines [`ShakedownError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ShakedownError` for process-level errors that need distinct handling
//! - Use `anyhow::Error` (via `ShakedownError::Other`) for unexpected errors
//! - Per-check probe failures are NOT errors: they become tagged
//!   [`ProbeOutcome`](crate::probe::ProbeOutcome) values and ultimately
//!   `ValidationResult`s, so a single failing check can never abort a run

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Shakedown operations.
#[derive(Debug, Error)]
pub enum ShakedownError {
    /// Failed to write the report artifact.
    #[error("Failed to write report to {path}: {message}")]
    ReportWrite { path: PathBuf, message: String },

    /// Failed to serialize the report artifact.
    #[error("Failed to serialize report: {message}")]
    ReportSerialize { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Shakedown operations.
pub type Result<T> = std::result::Result<T, ShakedownError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_write_displays_path_and_message() {
        let err = ShakedownError::ReportWrite {
            path: PathBuf::from("/tmp/report.json"),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/report.json"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn report_serialize_displays_message() {
        let err = ShakedownError::ReportSerialize {
            message: "bad value".into(),
        };
        assert!(err.to_string().contains("bad value"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ShakedownError = io_err.into();
        assert!(matches!(err, ShakedownError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ShakedownError::ReportSerialize {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
