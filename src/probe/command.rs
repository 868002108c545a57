//! External command execution bounded by a timeout.
//!
//! Version checks run tools like `git --version` or `docker info`. A hung
//! daemon socket must not hang the whole validation run, so the child is
//! polled against a deadline and killed if it exceeds the bound. Reader
//! threads drain stdout/stderr so a chatty child can never block on a full
//! pipe.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::probe::path::tool_on_path;

/// Default bound for external command probes.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between child liveness polls while waiting out the timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Tagged outcome of one command probe.
///
/// Every way a probe can go is a value, not an error: the engine matches
/// exhaustively and assigns a status per outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The command ran to completion (exit code may still be nonzero).
    Completed {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    /// The named executable is absent from PATH; nothing was spawned.
    ToolNotFound { tool: String },

    /// The command exceeded the timeout and was killed.
    TimedOut { timeout: Duration },

    /// Spawning or waiting on the command failed unexpectedly.
    Error { message: String },
}

impl ProbeOutcome {
    /// Whether the command completed with exit code 0.
    pub fn succeeded(&self) -> bool {
        matches!(self, ProbeOutcome::Completed { exit_code: 0, .. })
    }

    /// Combined stdout and stderr for completed commands, empty otherwise.
    ///
    /// Version banners land on either stream depending on the tool
    /// (`java -version` famously writes to stderr), so extraction always
    /// scans both.
    pub fn combined_output(&self) -> String {
        match self {
            ProbeOutcome::Completed { stdout, stderr, .. } => {
                if stderr.is_empty() {
                    stdout.clone()
                } else if stdout.is_empty() {
                    stderr.clone()
                } else {
                    format!("{}\n{}", stdout, stderr)
                }
            }
            _ => String::new(),
        }
    }
}

/// Run an external command, bounded by `timeout`.
///
/// The command string is split on whitespace: first token is the program,
/// the rest are arguments. No shell is involved, so PATH lookup and
/// word-splitting are the only resolution performed.
///
/// If the program is not on PATH this short-circuits to
/// [`ProbeOutcome::ToolNotFound`] without spawning anything, which is how
/// the caller distinguishes "missing tool" from "tool errored".
pub fn run_command(command: &str, timeout: Duration) -> ProbeOutcome {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return ProbeOutcome::Error {
            message: "empty command".to_string(),
        };
    };
    let args: Vec<&str> = parts.collect();

    if !tool_on_path(program) {
        return ProbeOutcome::ToolNotFound {
            tool: program.to_string(),
        };
    }

    let mut child = match Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            return ProbeOutcome::Error {
                message: format!("failed to spawn '{}': {}", program, e),
            }
        }
    };

    // Take the pipes before waiting; the readers run on their own threads
    // so the child can never block writing to a full pipe.
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let stdout_handle = thread::spawn(move || drain(stdout_pipe));
    let stderr_handle = thread::spawn(move || drain(stderr_pipe));

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Join the readers so the threads don't outlive the probe.
                    let _ = stdout_handle.join();
                    let _ = stderr_handle.join();
                    return ProbeOutcome::TimedOut { timeout };
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                return ProbeOutcome::Error {
                    message: format!("failed to wait on '{}': {}", program, e),
                };
            }
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    ProbeOutcome::Completed {
        exit_code: status.code().unwrap_or(-1),
        stdout: stdout.trim().to_string(),
        stderr: stderr.trim().to_string(),
    }
}

/// Read a pipe to completion, lossily converting to UTF-8.
fn drain(pipe: Option<impl Read>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).to_string()
}
