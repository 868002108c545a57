//! Runs every registered check and collects results.
//!
//! The engine owns no policy about *what* to check (that is registry data)
//! and no knowledge of *how* probing works (that is behind the [`Prober`]
//! and [`HostInspector`] seams). Its job is status assignment: mapping
//! tagged probe outcomes onto PASS/FAIL/WARNING/INFO per the check's
//! required flag.
//!
//! Probe output is cached per command within a run, so the daemon memory
//! check reuses the `docker info` output the reachability check already
//! fetched.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::checks::registry::{Check, CheckKind, CheckRegistry, ResourceThresholds};
use crate::checks::result::{RunSummary, ValidationResult, ValidationStatus};
use crate::host::{HostInspector, BYTES_PER_GB};
use crate::probe::{ProbeOutcome, Prober, DEFAULT_COMMAND_TIMEOUT, DEFAULT_PORT_TIMEOUT};
use crate::version::{compare_versions, extract_version, VersionOrdering};

/// Pattern for the memory line of `docker info` output.
const DAEMON_MEMORY_PATTERN: &str = r"Total Memory:\s*([0-9.]+)\s*([A-Za-z]+)";

/// Host probed for local port availability.
const PORT_PROBE_HOST: &str = "localhost";

/// Results of a full run, grouped by category in registry order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub categories: Vec<CategoryResults>,
}

/// The results of one registry category.
#[derive(Debug, Clone)]
pub struct CategoryResults {
    pub category: String,
    pub results: Vec<ValidationResult>,
}

impl RunReport {
    /// All results flattened in registry order.
    pub fn results(&self) -> impl Iterator<Item = &ValidationResult> {
        self.categories.iter().flat_map(|c| c.results.iter())
    }

    /// Fold the result collection into required-only counts.
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(self.results())
    }
}

/// Runs checks against a host through the probe seams.
pub struct Engine<'a> {
    probe: &'a dyn Prober,
    host: &'a dyn HostInspector,
    command_timeout: Duration,
    port_timeout: Duration,
    /// Per-run cache: the same command probed by multiple checks only
    /// executes once.
    output_cache: HashMap<String, ProbeOutcome>,
}

impl<'a> Engine<'a> {
    /// Create an engine with default probe timeouts.
    pub fn new(probe: &'a dyn Prober, host: &'a dyn HostInspector) -> Self {
        Self {
            probe,
            host,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            port_timeout: DEFAULT_PORT_TIMEOUT,
            output_cache: HashMap::new(),
        }
    }

    /// Override the command probe timeout.
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Run every registered check, in registry order.
    ///
    /// Every check produces exactly one result; no probe failure can abort
    /// the run or suppress later checks.
    pub fn run_all(&mut self, registry: &CheckRegistry) -> RunReport {
        let mut categories = Vec::with_capacity(registry.categories().len());
        for category in registry.categories() {
            tracing::debug!("running category: {}", category.name);
            let mut results = Vec::with_capacity(category.checks.len());
            for check in &category.checks {
                let result = self.evaluate(check);
                tracing::debug!(
                    "check '{}' -> {:?}: {}",
                    result.name,
                    result.status,
                    result.message
                );
                results.push(result);
            }
            categories.push(CategoryResults {
                category: category.name.to_string(),
                results,
            });
        }
        RunReport { categories }
    }

    fn evaluate(&mut self, check: &Check) -> ValidationResult {
        match &check.kind {
            CheckKind::OperatingSystem => self.check_operating_system(check),
            CheckKind::Architecture => self.check_architecture(check),
            CheckKind::Memory(thresholds) => self.check_memory(check, *thresholds),
            CheckKind::Disk(thresholds) => self.check_disk(check, *thresholds),
            CheckKind::ToolVersion {
                command,
                min_version,
                version_pattern,
                fallback_command,
            } => {
                let result =
                    self.check_tool_version(check, command, *min_version, *version_pattern);
                // The legacy binary only gets a look when the primary
                // check failed outright.
                if result.status == ValidationStatus::Fail {
                    if let Some(fallback) = fallback_command {
                        return self.check_tool_version(
                            check,
                            fallback,
                            *min_version,
                            *version_pattern,
                        );
                    }
                }
                result
            }
            CheckKind::DaemonReachable { command } => self.check_daemon_reachable(check, command),
            CheckKind::DaemonMemory {
                command,
                recommended_gb,
            } => self.check_daemon_memory(check, command, *recommended_gb),
            CheckKind::PortFree { port } => self.check_port_free(check, *port),
        }
    }

    /// Probe a command, reusing output already fetched this run.
    fn command_output(&mut self, command: &str) -> ProbeOutcome {
        if let Some(cached) = self.output_cache.get(command) {
            return cached.clone();
        }
        let outcome = self.probe.run_command(command, self.command_timeout);
        self.output_cache
            .insert(command.to_string(), outcome.clone());
        outcome
    }

    fn check_operating_system(&self, check: &Check) -> ValidationResult {
        let name = self.host.os_name();
        let release = self.host.os_release();
        if matches!(name.to_lowercase().as_str(), "linux" | "darwin" | "windows") {
            ValidationResult::new(
                check.name,
                ValidationStatus::Pass,
                format!("{} {}", name, release),
                check.required,
            )
        } else {
            ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                format!("Unsupported OS: {}", name),
                check.required,
            )
        }
    }

    fn check_architecture(&self, check: &Check) -> ValidationResult {
        let arch = self.host.architecture();
        if matches!(
            arch.to_lowercase().as_str(),
            "x86_64" | "amd64" | "arm64" | "aarch64"
        ) {
            ValidationResult::new(check.name, ValidationStatus::Pass, arch, check.required)
        } else {
            ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                format!("Untested architecture: {}", arch),
                check.required,
            )
        }
    }

    fn check_memory(&self, check: &Check, thresholds: ResourceThresholds) -> ValidationResult {
        let Some(total) = self.host.total_memory_bytes() else {
            // An unqueryable quantity is ambiguity, not a failure; it also
            // must not gate the run, so the result drops the required flag.
            return ValidationResult::new(
                check.name,
                ValidationStatus::Info,
                "Could not check memory",
                false,
            );
        };
        let gb = total as f64 / BYTES_PER_GB;

        if gb >= thresholds.recommended_gb {
            ValidationResult::new(
                check.name,
                ValidationStatus::Pass,
                format!("{:.1} GB (>= {:.0} GB)", gb, thresholds.recommended_gb),
                check.required,
            )
        } else if gb >= thresholds.minimum_gb {
            ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                format!(
                    "{:.1} GB (minimum {:.0} GB recommended)",
                    gb, thresholds.recommended_gb
                ),
                check.required,
            )
        } else {
            ValidationResult::new(
                check.name,
                ValidationStatus::Fail,
                format!("{:.1} GB (< {:.0} GB minimum)", gb, thresholds.minimum_gb),
                check.required,
            )
        }
    }

    fn check_disk(&self, check: &Check, thresholds: ResourceThresholds) -> ValidationResult {
        let Some(free) = self.host.free_disk_bytes(Path::new(".")) else {
            return ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                "Could not check disk space",
                false,
            );
        };
        let gb = free as f64 / BYTES_PER_GB;

        if gb >= thresholds.recommended_gb {
            ValidationResult::new(
                check.name,
                ValidationStatus::Pass,
                format!("{:.1} GB free (>= {:.0} GB)", gb, thresholds.recommended_gb),
                check.required,
            )
        } else if gb >= thresholds.minimum_gb {
            ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                format!(
                    "{:.1} GB free (minimum {:.0} GB recommended)",
                    gb, thresholds.recommended_gb
                ),
                check.required,
            )
        } else {
            ValidationResult::new(
                check.name,
                ValidationStatus::Fail,
                format!("{:.1} GB free (< {:.0} GB minimum)", gb, thresholds.minimum_gb),
                check.required,
            )
        }
    }

    fn check_tool_version(
        &mut self,
        check: &Check,
        command: &str,
        min_version: Option<&str>,
        version_pattern: Option<&str>,
    ) -> ValidationResult {
        match self.command_output(command) {
            ProbeOutcome::ToolNotFound { tool } => ValidationResult::new(
                check.name,
                if check.required {
                    ValidationStatus::Fail
                } else {
                    ValidationStatus::Info
                },
                format!("{} not found in PATH", tool),
                check.required,
            ),
            ProbeOutcome::TimedOut { timeout } => ValidationResult::new(
                check.name,
                if check.required {
                    ValidationStatus::Fail
                } else {
                    ValidationStatus::Warning
                },
                format!("Version check timed out after {}s", timeout.as_secs()),
                check.required,
            ),
            ProbeOutcome::Error { message } => ValidationResult::new(
                check.name,
                if check.required {
                    ValidationStatus::Fail
                } else {
                    ValidationStatus::Info
                },
                "Failed to get version",
                check.required,
            )
            .with_details(message),
            ProbeOutcome::Completed {
                exit_code, stderr, ..
            } if exit_code != 0 => {
                let result = ValidationResult::new(
                    check.name,
                    if check.required {
                        ValidationStatus::Fail
                    } else {
                        ValidationStatus::Info
                    },
                    format!("Failed to get version (exit code {})", exit_code),
                    check.required,
                );
                if stderr.is_empty() {
                    result
                } else {
                    result.with_details(stderr)
                }
            }
            outcome @ ProbeOutcome::Completed { .. } => {
                let output = outcome.combined_output();
                match extract_version(&output, version_pattern) {
                    None => ValidationResult::new(
                        check.name,
                        ValidationStatus::Warning,
                        format!("Could not parse version from: {}", truncate(&output, 100)),
                        check.required,
                    ),
                    Some(version) => self.classify_version(check, &version, min_version),
                }
            }
        }
    }

    fn classify_version(
        &self,
        check: &Check,
        version: &str,
        min_version: Option<&str>,
    ) -> ValidationResult {
        let Some(min) = min_version else {
            return ValidationResult::new(
                check.name,
                ValidationStatus::Pass,
                format!("Version {}", version),
                check.required,
            );
        };

        match compare_versions(version, min) {
            VersionOrdering::Numeric(std::cmp::Ordering::Less) => ValidationResult::new(
                check.name,
                ValidationStatus::Fail,
                format!("Version {} < {}", version, min),
                check.required,
            ),
            VersionOrdering::Numeric(_) => ValidationResult::new(
                check.name,
                ValidationStatus::Pass,
                format!("Version {} (>= {})", version, min),
                check.required,
            ),
            // The lexicographic comparator carries less confidence, so a
            // satisfied floor is still only a warning.
            VersionOrdering::Lexicographic(std::cmp::Ordering::Less) => ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                format!("Version {}, expected >= {} (simple comparison)", version, min),
                check.required,
            ),
            VersionOrdering::Lexicographic(_) => ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                format!("Version {} (>= {}, simple comparison)", version, min),
                check.required,
            ),
        }
    }

    fn check_daemon_reachable(&mut self, check: &Check, command: &str) -> ValidationResult {
        match self.command_output(command) {
            ProbeOutcome::Completed { exit_code: 0, .. } => {
                ValidationResult::new(check.name, ValidationStatus::Pass, "Running", check.required)
            }
            ProbeOutcome::Completed { stderr, .. } => {
                let result = ValidationResult::new(
                    check.name,
                    if check.required {
                        ValidationStatus::Fail
                    } else {
                        ValidationStatus::Info
                    },
                    "Not running",
                    check.required,
                );
                if stderr.is_empty() {
                    result
                } else {
                    result.with_details(stderr)
                }
            }
            ProbeOutcome::ToolNotFound { tool } => ValidationResult::new(
                check.name,
                if check.required {
                    ValidationStatus::Fail
                } else {
                    ValidationStatus::Info
                },
                format!("{} not found in PATH", tool),
                check.required,
            ),
            ProbeOutcome::TimedOut { timeout } => ValidationResult::new(
                check.name,
                if check.required {
                    ValidationStatus::Fail
                } else {
                    ValidationStatus::Warning
                },
                format!("Status check timed out after {}s", timeout.as_secs()),
                check.required,
            ),
            ProbeOutcome::Error { message } => ValidationResult::new(
                check.name,
                if check.required {
                    ValidationStatus::Fail
                } else {
                    ValidationStatus::Info
                },
                "Not running",
                check.required,
            )
            .with_details(message),
        }
    }

    fn check_daemon_memory(
        &mut self,
        check: &Check,
        command: &str,
        recommended_gb: f64,
    ) -> ValidationResult {
        let outcome = self.command_output(command);
        if !outcome.succeeded() {
            return ValidationResult::new(
                check.name,
                ValidationStatus::Info,
                "Could not check (daemon not reachable)",
                false,
            );
        }

        let output = outcome.combined_output();
        let Some(gb) = parse_daemon_memory_gb(&output) else {
            return ValidationResult::new(
                check.name,
                ValidationStatus::Info,
                "Could not parse memory allocation",
                false,
            );
        };

        if gb >= recommended_gb {
            ValidationResult::new(
                check.name,
                ValidationStatus::Pass,
                format!("{:.1} GB allocated (>= {:.0} GB)", gb, recommended_gb),
                check.required,
            )
        } else {
            ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                format!("{:.1} GB allocated (< {:.0} GB recommended)", gb, recommended_gb),
                check.required,
            )
        }
    }

    fn check_port_free(&self, check: &Check, port: u16) -> ValidationResult {
        use crate::probe::PortProbe;

        // Occupied ports are a soft conflict risk, not a missing
        // dependency: port results never carry the required flag.
        match self.probe.probe_port(PORT_PROBE_HOST, port, self.port_timeout) {
            PortProbe::Connected => ValidationResult::new(
                check.name,
                ValidationStatus::Warning,
                "In use (may conflict)",
                false,
            ),
            PortProbe::Refused | PortProbe::TimedOut => {
                ValidationResult::new(check.name, ValidationStatus::Pass, "Available", false)
            }
            PortProbe::Error { message } => ValidationResult::new(
                check.name,
                ValidationStatus::Info,
                format!("Could not check: {}", message),
                false,
            ),
        }
    }
}

/// Parse the daemon's allocated memory in GB from its status output.
fn parse_daemon_memory_gb(output: &str) -> Option<f64> {
    let re = regex::Regex::new(DAEMON_MEMORY_PATTERN).ok()?;
    let caps = re.captures(output)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_lowercase();

    if unit.starts_with('g') {
        Some(value)
    } else if unit.starts_with('m') {
        Some(value / 1024.0)
    } else {
        Some(0.0)
    }
}

/// Truncate to at most `max` characters, on a char boundary.
fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
