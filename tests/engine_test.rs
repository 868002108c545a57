//! End-to-end engine tests through the public API.
//!
//! These drive the engine with mock probe and host implementations, the
//! way the real CLI wires `SystemProbe`/`SystemHost`, and assert on the
//! aggregate behavior the per-module unit tests don't cover.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use shakedown::checks::{
    Category, Check, CheckKind, CheckRegistry, Engine, ValidationStatus,
};
use shakedown::host::HostInspector;
use shakedown::probe::{PortProbe, ProbeOutcome, Prober};
use shakedown::report::{render_report, ReportArtifact, Theme};

struct ScriptedProbe {
    outcomes: HashMap<&'static str, ProbeOutcome>,
}

impl ScriptedProbe {
    fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
        }
    }

    fn with_version(mut self, command: &'static str, banner: &str) -> Self {
        self.outcomes.insert(
            command,
            ProbeOutcome::Completed {
                exit_code: 0,
                stdout: banner.to_string(),
                stderr: String::new(),
            },
        );
        self
    }
}

impl Prober for ScriptedProbe {
    fn run_command(&self, command: &str, _timeout: Duration) -> ProbeOutcome {
        self.outcomes
            .get(command)
            .cloned()
            .unwrap_or(ProbeOutcome::ToolNotFound {
                tool: command.split_whitespace().next().unwrap_or("").to_string(),
            })
    }

    fn tool_on_path(&self, tool: &str) -> bool {
        self.outcomes
            .keys()
            .any(|cmd| cmd.split_whitespace().next() == Some(tool))
    }

    fn probe_port(&self, _host: &str, _port: u16, _timeout: Duration) -> PortProbe {
        PortProbe::Refused
    }
}

struct ScriptedHost;

impl HostInspector for ScriptedHost {
    fn os_name(&self) -> String {
        "Linux".to_string()
    }
    fn os_release(&self) -> String {
        "6.1.0".to_string()
    }
    fn architecture(&self) -> String {
        "x86_64".to_string()
    }
    fn total_memory_bytes(&self) -> Option<u64> {
        Some(32 * 1024 * 1024 * 1024)
    }
    fn free_disk_bytes(&self, _path: &Path) -> Option<u64> {
        Some(200 * 1024 * 1024 * 1024)
    }
}

fn tool(name: &'static str, command: &'static str, min: &'static str, required: bool) -> Check {
    Check {
        name,
        kind: CheckKind::ToolVersion {
            command,
            min_version: Some(min),
            version_pattern: None,
            fallback_command: None,
        },
        required,
    }
}

/// Registry with 3 required checks (2 PASS, 1 FAIL) and 2 optional checks
/// (both failing version floors).
fn mixed_registry() -> CheckRegistry {
    CheckRegistry::new(vec![Category {
        name: "Core Tools",
        checks: vec![
            tool("git", "git --version", "2.40", true),
            tool("node", "node --version", "18.0", true),
            tool("docker", "docker --version", "24.0", true),
            tool("code", "code --version", "1.80", false),
            tool("poetry", "poetry --version", "1.7", false),
        ],
    }])
}

fn mixed_probe() -> ScriptedProbe {
    ScriptedProbe::new()
        .with_version("git --version", "git version 2.42.1")
        .with_version("node --version", "v20.11.0")
        .with_version("docker --version", "Docker version 20.10.5") // below 24.0
        .with_version("code --version", "1.50.0") // below 1.80
        .with_version("poetry --version", "Poetry (version 1.2.0)") // below 1.7
}

#[test]
fn required_failure_fails_run_while_optional_failures_do_not() {
    let probe = mixed_probe();
    let host = ScriptedHost;
    let mut engine = Engine::new(&probe, &host);
    let report = engine.run_all(&mixed_registry());
    let summary = report.summary();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);
    assert!(!summary.overall_pass());

    // Both optional checks did fail their floors, individually.
    let optional_failures = report
        .results()
        .filter(|r| !r.required && r.status == ValidationStatus::Fail)
        .count();
    assert_eq!(optional_failures, 2);
}

#[test]
fn only_optional_failures_still_pass_overall() {
    let probe = ScriptedProbe::new()
        .with_version("git --version", "git version 2.42.1")
        .with_version("node --version", "v20.11.0")
        .with_version("docker --version", "Docker version 24.0.6")
        .with_version("code --version", "1.50.0")
        .with_version("poetry --version", "Poetry (version 1.2.0)");
    let host = ScriptedHost;
    let mut engine = Engine::new(&probe, &host);
    let report = engine.run_all(&mixed_registry());

    assert!(report.summary().overall_pass());
}

#[test]
fn summary_line_reports_required_only_counts() {
    let probe = mixed_probe();
    let host = ScriptedHost;
    let mut engine = Engine::new(&probe, &host);
    let report = engine.run_all(&mixed_registry());

    let text = render_report(&report, &Theme::plain());
    assert!(text.contains("Passed: 2/3"));
    assert!(text.contains("Failed: 1/3"));
}

#[test]
fn identical_probe_responses_yield_identical_reports_except_timestamp() {
    let probe = mixed_probe();
    let host = ScriptedHost;
    let registry = mixed_registry();

    let report_a = Engine::new(&probe, &host).run_all(&registry);
    let report_b = Engine::new(&probe, &host).run_all(&registry);

    // Console rendering is byte-identical.
    assert_eq!(
        render_report(&report_a, &Theme::plain()),
        render_report(&report_b, &Theme::plain())
    );

    // Artifacts differ only in the timestamp: pin it and compare bytes.
    let timestamp = "2024-05-01T12:30:45Z".parse().unwrap();
    let artifact_a = ReportArtifact::with_timestamp(&report_a, &host, timestamp);
    let artifact_b = ReportArtifact::with_timestamp(&report_b, &host, timestamp);
    assert_eq!(
        artifact_a.to_json().unwrap(),
        artifact_b.to_json().unwrap()
    );
}

#[test]
fn standard_registry_runs_to_completion_with_empty_probe() {
    // Even a host with nothing installed gets one result per check.
    let probe = ScriptedProbe::new();
    let host = ScriptedHost;
    let registry = CheckRegistry::standard();

    let mut engine = Engine::new(&probe, &host);
    let report = engine.run_all(&registry);

    assert_eq!(report.results().count(), registry.check_count());
    // Every missing required tool is a FAIL, so the run fails overall.
    assert!(!report.summary().overall_pass());
}

#[test]
fn artifact_preserves_registry_order() {
    let probe = mixed_probe();
    let host = ScriptedHost;
    let mut engine = Engine::new(&probe, &host);
    let report = engine.run_all(&mixed_registry());

    let artifact = ReportArtifact::from_run(&report, &host);
    let names: Vec<&str> = artifact.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["git", "node", "docker", "code", "poetry"]);
}
