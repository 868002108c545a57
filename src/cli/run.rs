//! The validation run driven by the CLI.

use std::time::Duration;

use crate::checks::{CheckRegistry, Engine};
use crate::cli::args::Cli;
use crate::error::Result;
use crate::host::SystemHost;
use crate::probe::SystemProbe;
use crate::report::{render_report, write_report, ReportArtifact, Theme};

/// Run the full check battery, print the results, and write the report
/// artifact.
///
/// Returns whether the overall outcome is PASS; the caller maps that to
/// the process exit code.
pub fn run_validation(cli: &Cli) -> Result<bool> {
    let probe = SystemProbe;
    let host = SystemHost;
    let registry = CheckRegistry::standard();

    tracing::debug!(
        "running {} checks, report path {}",
        registry.check_count(),
        cli.report.display()
    );

    let mut engine =
        Engine::new(&probe, &host).with_command_timeout(Duration::from_secs(cli.timeout));
    let report = engine.run_all(&registry);
    let summary = report.summary();

    let artifact = ReportArtifact::from_run(&report, &host);

    if cli.json {
        println!("{}", artifact.to_json()?);
    } else {
        let theme = if cli.no_color {
            Theme::plain()
        } else {
            Theme::auto()
        };
        if cli.quiet {
            print!("{}", crate::report::console::render_summary(&report, &theme));
        } else {
            print!("{}", render_report(&report, &theme));
        }
    }

    write_report(&artifact, &cli.report)?;
    if !cli.json && !cli.quiet {
        println!("\nDetailed report saved to: {}", cli.report.display());
    }

    Ok(summary.overall_pass())
}
