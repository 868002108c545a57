//! Machine-readable JSON report artifact.
//!
//! The schema is fixed: `timestamp`, `system.{os, release, architecture,
//! runtime_version}`, and `results[]` with `{name, status, message,
//! details, required}` per entry, in registry order.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checks::engine::RunReport;
use crate::checks::result::ValidationResult;
use crate::error::{Result, ShakedownError};
use crate::host::HostInspector;

/// Shakedown's own version, recorded in the artifact.
pub const RUNTIME_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host metadata recorded alongside the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMetadata {
    pub os: String,
    pub release: String,
    pub architecture: String,
    pub runtime_version: String,
}

/// The serialized report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportArtifact {
    /// When the run completed (ISO-8601).
    pub timestamp: DateTime<Utc>,
    pub system: SystemMetadata,
    /// Full ordered result list, registry order.
    pub results: Vec<ValidationResult>,
}

impl ReportArtifact {
    /// Build an artifact from a run, stamped with the current time.
    pub fn from_run(report: &RunReport, host: &dyn HostInspector) -> Self {
        Self::with_timestamp(report, host, Utc::now())
    }

    /// Build an artifact with an explicit timestamp.
    pub fn with_timestamp(
        report: &RunReport,
        host: &dyn HostInspector,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            system: SystemMetadata {
                os: host.os_name(),
                release: host.os_release(),
                architecture: host.architecture(),
                runtime_version: RUNTIME_VERSION.to_string(),
            },
            results: report.results().cloned().collect(),
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ShakedownError::ReportSerialize {
            message: e.to_string(),
        })
    }
}

/// Write the artifact to `path`, overwriting any existing file.
pub fn write_report(artifact: &ReportArtifact, path: &Path) -> Result<()> {
    let json = artifact.to_json()?;
    fs::write(path, json).map_err(|e| ShakedownError::ReportWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
