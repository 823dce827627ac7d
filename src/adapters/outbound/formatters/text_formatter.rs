use crate::application::read_models::{CheckReport, RemovalSummary};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// TextFormatter adapter for human-readable output
///
/// Layout:
/// ```text
/// Target major: el9
/// Date: 2026-01-01
///
/// Outdated packages:
/// - python39
///
/// Outdated modules:
/// - nodejs:18
///
/// Packages to remove:
/// - nodejs
/// - python39
/// ```
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn section(output: &mut String, title: &str, empty_title: &str, items: &[String]) -> Result<()> {
        output.push('\n');
        if items.is_empty() {
            writeln!(output, "{}", empty_title)?;
            return Ok(());
        }
        writeln!(output, "{}:", title)?;
        for item in items {
            writeln!(output, "- {}", item)?;
        }
        Ok(())
    }

    fn removal(output: &mut String, removal: &RemovalSummary) -> Result<()> {
        output.push('\n');
        if removal.dry_run {
            writeln!(output, "Dry run: no packages were removed")?;
            return Ok(());
        }
        if !removal.removed.is_empty() {
            output.push_str("Removed:\n");
            for package in &removal.removed {
                writeln!(output, "- {}", package)?;
            }
        }
        if !removal.failed.is_empty() {
            output.push_str("Failed to remove:\n");
            for failure in &removal.failed {
                writeln!(output, "- {}: {}", failure.package, failure.reason)?;
            }
        }
        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &CheckReport) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Target major: {}", report.target_major)?;
        writeln!(output, "Date: {}", report.date.format("%Y-%m-%d"))?;

        Self::section(
            &mut output,
            "Outdated packages",
            "No outdated packages",
            &report.matched_packages,
        )?;
        Self::section(
            &mut output,
            "Outdated modules",
            "No outdated modules",
            &report.matched_dnf_modules,
        )?;
        Self::section(
            &mut output,
            "Packages to remove",
            "No packages to remove",
            &report.packages_to_remove,
        )?;

        if let Some(removal) = &report.removal {
            Self::removal(&mut output, removal)?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{CheckReportBuilder, FailedRemoval};
    use crate::lifecycle::domain::{LifecycleMatch, MatchResult, OsMajor};
    use chrono::NaiveDate;

    fn report() -> CheckReport {
        CheckReportBuilder::build(&MatchResult {
            target_major: OsMajor::parse("el9").unwrap(),
            reference_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            matches: vec![LifecycleMatch {
                package_name: "nodejs".to_string(),
                module: Some("nodejs".to_string()),
                stream: Some("18".to_string()),
                end_of_life: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            }],
        })
    }

    #[test]
    fn test_text_sections() {
        let output = TextFormatter::new().format(&report()).unwrap();
        assert_eq!(
            output,
            "Target major: el9\nDate: 2026-01-01\n\nNo outdated packages\n\nOutdated modules:\n- nodejs:18\n\nPackages to remove:\n- nodejs\n"
        );
    }

    #[test]
    fn test_text_removal_failures() {
        let mut report = report();
        report.removal = Some(RemovalSummary {
            dry_run: false,
            removed: vec![],
            failed: vec![FailedRemoval {
                package: "nodejs".to_string(),
                reason: "still installed after dnf remove".to_string(),
            }],
        });
        let output = TextFormatter::new().format(&report).unwrap();
        assert!(output.ends_with("Failed to remove:\n- nodejs: still installed after dnf remove\n"));
    }

    #[test]
    fn test_text_removal_sections() {
        let mut report = report();
        report.removal = Some(CheckReportBuilder::dry_run_summary());
        let dry_run = TextFormatter::new().format(&report).unwrap();
        assert!(dry_run.ends_with("\n\nDry run: no packages were removed\n"));

        report.removal = Some(RemovalSummary {
            dry_run: false,
            removed: vec!["npm".to_string()],
            failed: vec![FailedRemoval {
                package: "nodejs".to_string(),
                reason: "protected".to_string(),
            }],
        });
        let mixed = TextFormatter::new().format(&report).unwrap();
        assert!(mixed.ends_with("\n\nRemoved:\n- npm\nFailed to remove:\n- nodejs: protected\n"));
    }

    #[test]
    fn test_json_and_yaml_formatters() {
        use crate::adapters::outbound::formatters::{JsonFormatter, YamlFormatter};

        let json = JsonFormatter::new().format(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["matched_dnf_modules"][0], "nodejs:18");
        assert_eq!(value["any_match"], true);

        let yaml = YamlFormatter::new().format(&report()).unwrap();
        assert!(yaml.contains("target_major: el9"));
        assert!(yaml.contains("nodejs:18"));
    }
}
