//! Probes for inspecting the host environment.
//!
//! Everything here is a side-effecting boundary with no policy: probes run
//! external commands, resolve binaries on PATH, and attempt TCP connects,
//! returning tagged outcomes the validation engine maps to statuses.
//!
//! # Modules
//!
//! - [`command`] - External command execution bounded by a timeout
//! - [`path`] - Binary resolution over PATH entries
//! - [`port`] - TCP connect probe for local port availability

pub mod command;
pub mod path;
pub mod port;

pub use command::{run_command, ProbeOutcome, DEFAULT_COMMAND_TIMEOUT};
pub use path::{is_executable, parse_system_path, resolve_tool_path, tool_on_path};
pub use port::{probe_port, PortProbe, DEFAULT_PORT_TIMEOUT};

use std::time::Duration;

/// The seam between the validation engine and the host.
///
/// The engine only ever talks to a `Prober`; [`SystemProbe`] is the real
/// implementation, and tests substitute canned outcomes.
pub trait Prober {
    /// Run an external command, bounded by `timeout`.
    fn run_command(&self, command: &str, timeout: Duration) -> ProbeOutcome;

    /// Whether a tool binary resolves on the current PATH.
    fn tool_on_path(&self, tool: &str) -> bool;

    /// Attempt a TCP connection to `host:port`, bounded by `timeout`.
    fn probe_port(&self, host: &str, port: u16, timeout: Duration) -> PortProbe;
}

/// Probes the real system.
#[derive(Debug, Default)]
pub struct SystemProbe;

impl Prober for SystemProbe {
    fn run_command(&self, command: &str, timeout: Duration) -> ProbeOutcome {
        command::run_command(command, timeout)
    }

    fn tool_on_path(&self, tool: &str) -> bool {
        path::tool_on_path(tool)
    }

    fn probe_port(&self, host: &str, port: u16, timeout: Duration) -> PortProbe {
        port::probe_port(host, port, timeout)
    }
}
