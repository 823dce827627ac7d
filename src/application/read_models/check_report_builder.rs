//! Builder for constructing CheckReport from domain objects

use super::check_report::{CheckReport, FailedRemoval, RemovalSummary};
use crate::lifecycle::domain::MatchResult;
use crate::ports::outbound::RemovalReport;
use std::collections::BTreeSet;

/// Builds the report view from a `MatchResult`, splitting matches into
/// module-less packages and module streams the way operators read them.
pub struct CheckReportBuilder;

impl CheckReportBuilder {
    pub fn build(result: &MatchResult) -> CheckReport {
        let mut matched_packages = BTreeSet::new();
        let mut matched_modules = BTreeSet::new();
        let mut matched_module_packages = BTreeSet::new();

        for m in &result.matches {
            match m.module_label() {
                Some(label) => {
                    matched_modules.insert(label);
                    matched_module_packages.insert(m.package_name.clone());
                }
                None => {
                    matched_packages.insert(m.package_name.clone());
                }
            }
        }

        CheckReport {
            target_major: result.target_major.clone(),
            date: result.reference_date,
            matched_packages: matched_packages.into_iter().collect(),
            matched_dnf_modules: matched_modules.into_iter().collect(),
            matched_dnf_modules_packages: matched_module_packages.into_iter().collect(),
            packages_to_remove: result.package_names(),
            any_match: result.any_match(),
            matches: result.matches.clone(),
            removal: None,
        }
    }

    /// Summary for a cleanup run that actually removed packages
    pub fn removal_summary(report: &RemovalReport) -> RemovalSummary {
        RemovalSummary {
            dry_run: false,
            removed: report.removed().into_iter().map(str::to_string).collect(),
            failed: report
                .failed()
                .into_iter()
                .map(|(package, reason)| FailedRemoval {
                    package: package.to_string(),
                    reason: reason.to_string(),
                })
                .collect(),
        }
    }

    /// Summary for `--dry-run`: nothing removed, nothing failed
    pub fn dry_run_summary() -> RemovalSummary {
        RemovalSummary {
            dry_run: true,
            ..Default::default()
        }
    }
}
