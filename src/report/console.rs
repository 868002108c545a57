//! Human-readable rendering grouped by category.

use crate::checks::engine::RunReport;
use crate::checks::result::ValidationStatus;
use crate::report::theme::Theme;

/// Render the full report: header, per-category sections, summary block,
/// and a closing verdict line.
///
/// Output order is registry order, so two runs against identical probe
/// responses render identically.
pub fn render_report(report: &RunReport, theme: &Theme) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        theme.header.apply_to("Shakedown - Dependency Validation")
    ));
    out.push_str(&format!("{}\n\n", "=".repeat(60)));

    for category in &report.categories {
        out.push_str(&format!("{}\n", theme.header.apply_to(&category.category)));
        out.push_str(&format!("{}\n", theme.dim.apply_to("-".repeat(40))));

        for result in &category.results {
            let marker = if result.required { "" } else { " (optional)" };
            out.push_str(&format!(
                "{} {}{}: {}\n",
                styled_icon(result.status, theme),
                result.name,
                marker,
                result.message
            ));
            if let Some(details) = &result.details {
                out.push_str(&format!("   {}\n", theme.dim.apply_to(details)));
            }
        }
        out.push('\n');
    }

    out.push_str(&render_summary(report, theme));
    out
}

/// Render only the summary block (used by quiet mode).
pub fn render_summary(report: &RunReport, theme: &Theme) -> String {
    let summary = report.summary();
    let mut out = String::new();

    out.push_str(&format!("{}\n", theme.header.apply_to("Summary")));
    out.push_str(&format!("{}\n", theme.dim.apply_to("-".repeat(40))));
    out.push_str(&format!(
        "{} Passed: {}/{}\n",
        styled_icon(ValidationStatus::Pass, theme),
        summary.passed,
        summary.total
    ));
    out.push_str(&format!(
        "{} Failed: {}/{}\n",
        styled_icon(ValidationStatus::Fail, theme),
        summary.failed,
        summary.total
    ));
    out.push_str(&format!(
        "{} Warnings: {}/{}\n\n",
        styled_icon(ValidationStatus::Warning, theme),
        summary.warnings,
        summary.total
    ));

    if summary.failed > 0 {
        out.push_str(&format!(
            "{}\n",
            theme
                .fail
                .apply_to("Critical issues found. Please resolve before proceeding.")
        ));
    } else if summary.warnings > 0 {
        out.push_str(&format!(
            "{}\n",
            theme.warning.apply_to(
                "Some warnings found. Development may work but performance could be impacted."
            )
        ));
    } else {
        out.push_str(&format!(
            "{}\n",
            theme
                .pass
                .apply_to("All checks passed! Your system is ready for development.")
        ));
    }

    out
}

/// Status glyph with the matching theme style applied.
fn styled_icon(status: ValidationStatus, theme: &Theme) -> String {
    let icon = status.icon();
    match status {
        ValidationStatus::Pass => theme.pass.apply_to(icon).to_string(),
        ValidationStatus::Fail => theme.fail.apply_to(icon).to_string(),
        ValidationStatus::Warning => theme.warning.apply_to(icon).to_string(),
        ValidationStatus::Info => theme.info.apply_to(icon).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::engine::CategoryResults;
    use crate::checks::result::ValidationResult;

    fn sample_report() -> RunReport {
        RunReport {
            categories: vec![
                CategoryResults {
                    category: "Core Tools".to_string(),
                    results: vec![
                        ValidationResult::new(
                            "git",
                            ValidationStatus::Pass,
                            "Version 2.42.1 (>= 2.40)",
                            true,
                        ),
                        ValidationResult::new(
                            "docker",
                            ValidationStatus::Fail,
                            "docker not found in PATH",
                            true,
                        ),
                    ],
                },
                CategoryResults {
                    category: "IDE Tools".to_string(),
                    results: vec![ValidationResult::new(
                        "code",
                        ValidationStatus::Info,
                        "code not found in PATH",
                        false,
                    )],
                },
            ],
        }
    }

    #[test]
    fn render_groups_by_category_in_order() {
        let text = render_report(&sample_report(), &Theme::plain());
        let core_idx = text.find("Core Tools").unwrap();
        let ide_idx = text.find("IDE Tools").unwrap();
        assert!(core_idx < ide_idx);
    }

    #[test]
    fn render_marks_optional_checks() {
        let text = render_report(&sample_report(), &Theme::plain());
        assert!(text.contains("code (optional):"));
        assert!(text.contains("git: Version 2.42.1 (>= 2.40)"));
    }

    #[test]
    fn render_includes_summary_counts() {
        let text = render_report(&sample_report(), &Theme::plain());
        assert!(text.contains("Passed: 1/2"));
        assert!(text.contains("Failed: 1/2"));
        assert!(text.contains("Warnings: 0/2"));
    }

    #[test]
    fn render_shows_failure_verdict_when_required_check_fails() {
        let text = render_report(&sample_report(), &Theme::plain());
        assert!(text.contains("Critical issues found"));
    }

    #[test]
    fn render_shows_success_verdict_when_all_pass() {
        let report = RunReport {
            categories: vec![CategoryResults {
                category: "Core Tools".to_string(),
                results: vec![ValidationResult::new(
                    "git",
                    ValidationStatus::Pass,
                    "Version 2.42.1 (>= 2.40)",
                    true,
                )],
            }],
        };
        let text = render_report(&report, &Theme::plain());
        assert!(text.contains("All checks passed!"));
    }

    #[test]
    fn render_shows_warning_verdict_without_failures() {
        let report = RunReport {
            categories: vec![CategoryResults {
                category: "Core Tools".to_string(),
                results: vec![ValidationResult::new(
                    "git",
                    ValidationStatus::Warning,
                    "Version v3 (>= 2.9, simple comparison)",
                    true,
                )],
            }],
        };
        let text = render_report(&report, &Theme::plain());
        assert!(text.contains("Some warnings found"));
    }

    #[test]
    fn render_includes_details_when_present() {
        let report = RunReport {
            categories: vec![CategoryResults {
                category: "Docker Configuration".to_string(),
                results: vec![ValidationResult::new(
                    "Docker Daemon",
                    ValidationStatus::Fail,
                    "Not running",
                    true,
                )
                .with_details("Cannot connect to the Docker daemon")],
            }],
        };
        let text = render_report(&report, &Theme::plain());
        assert!(text.contains("   Cannot connect to the Docker daemon"));
    }

    #[test]
    fn render_is_deterministic() {
        let report = sample_report();
        let a = render_report(&report, &Theme::plain());
        let b = render_report(&report, &Theme::plain());
        assert_eq!(a, b);
    }
}
