//! Version extraction and comparison.
//!
//! Tool version banners are free-form, so extraction is regex-based: a
//! default dotted-numeric pattern, overridable per check for tools with
//! unusual banners (`java -version` prints `version "21.0.1"`).
//!
//! Comparison has two strategies, both always available. Dotted-numeric
//! strings get component-wise numeric ordering; anything else falls back
//! to plain lexicographic ordering. The result says which strategy was
//! used so the caller can downgrade confidence: a lexicographic "pass" is
//! reported as a warning, never as a confident pass.

use std::cmp::Ordering;

use regex::Regex;

/// Default extraction pattern: first `D+.D+(.D+)?`-shaped token.
pub const DEFAULT_VERSION_PATTERN: &str = r"(\d+\.\d+(?:\.\d+)?)";

/// Extract a version string from command output.
///
/// A caller-supplied pattern takes precedence and must capture exactly one
/// group containing the version. An invalid pattern extracts nothing,
/// which the engine reports as a warning on the affected check.
pub fn extract_version(output: &str, pattern: Option<&str>) -> Option<String> {
    let pattern = pattern.unwrap_or(DEFAULT_VERSION_PATTERN);
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(output)?;
    caps.get(1).map(|m| m.as_str().to_string())
}

/// An ordering plus the strategy that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrdering {
    /// Both sides parsed as dotted integers; component-wise numeric compare.
    Numeric(Ordering),
    /// At least one side had a non-numeric component; plain string compare.
    Lexicographic(Ordering),
}

impl VersionOrdering {
    /// The ordering regardless of strategy.
    pub fn ordering(self) -> Ordering {
        match self {
            VersionOrdering::Numeric(ord) | VersionOrdering::Lexicographic(ord) => ord,
        }
    }

    /// Whether the numeric strategy applied.
    pub fn is_numeric(self) -> bool {
        matches!(self, VersionOrdering::Numeric(_))
    }
}

/// Compare two version strings.
///
/// Missing trailing components are treated as 0, so "24.0" == "24.0.0"
/// and "2.10" > "2.9" (numeric, not the naive string ordering).
pub fn compare_versions(a: &str, b: &str) -> VersionOrdering {
    match (parse_components(a), parse_components(b)) {
        (Some(left), Some(right)) => VersionOrdering::Numeric(compare_components(&left, &right)),
        _ => VersionOrdering::Lexicographic(a.cmp(b)),
    }
}

/// Parse a dotted-integer version into components, or None if any
/// component is non-numeric.
fn parse_components(version: &str) -> Option<Vec<u64>> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .split('.')
        .map(|component| component.parse::<u64>().ok())
        .collect()
}

fn compare_components(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
