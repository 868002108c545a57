//! Per-check results and the run-level summary fold.

use serde::{Deserialize, Serialize};

/// Outcome classification for a single check.
///
/// INFO is orthogonal: it marks a check that could not be evaluated (or is
/// purely informational) and never affects the overall outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Pass,
    Fail,
    Warning,
    Info,
}

impl ValidationStatus {
    /// Unicode glyph for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Fail => "✗",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Pass => "[ok]",
            Self::Fail => "[FAIL]",
            Self::Warning => "[warn]",
            Self::Info => "[info]",
        }
    }
}

/// One outcome of one check. Created exactly once per check execution,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Human-readable check identifier (e.g. "docker", "Port 9092").
    pub name: String,
    /// Outcome classification.
    pub status: ValidationStatus,
    /// Short human-readable explanation.
    pub message: String,
    /// Optional longer explanation (probe error text, raw output).
    pub details: Option<String>,
    /// Whether a FAIL here fails the overall run.
    pub required: bool,
}

impl ValidationResult {
    /// Build a result with no details.
    pub fn new(
        name: impl Into<String>,
        status: ValidationStatus,
        message: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            details: None,
            required,
        }
    }

    /// Attach a longer explanation.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Required-only counts and the overall verdict.
///
/// A pure fold over a result collection; recomputed whenever needed, never
/// stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Number of required checks.
    pub total: usize,
    /// Required checks that passed.
    pub passed: usize,
    /// Required checks that failed.
    pub failed: usize,
    /// Required checks with warnings.
    pub warnings: usize,
}

impl RunSummary {
    /// Fold a result collection into a summary.
    ///
    /// Only `required` results are counted; optional checks inform but
    /// never decide.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ValidationResult>) -> Self {
        let mut summary = Self::default();
        for result in results {
            if !result.required {
                continue;
            }
            summary.total += 1;
            match result.status {
                ValidationStatus::Pass => summary.passed += 1,
                ValidationStatus::Fail => summary.failed += 1,
                ValidationStatus::Warning => summary.warnings += 1,
                ValidationStatus::Info => {}
            }
        }
        summary
    }

    /// Overall outcome: FAIL iff any required check failed. Warnings alone
    /// never fail a run.
    pub fn overall_pass(&self) -> bool {
        self.failed == 0
    }
}
