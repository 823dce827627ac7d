use super::CheckLifecycleUseCase;
use crate::application::dto::CleanupRequest;
use crate::application::read_models::{CheckReport, CheckReportBuilder};
use crate::ports::outbound::{
    DatasetReader, HostInfo, InventoryCollector, PackageRemover, ProgressReporter,
};
use crate::shared::Result;
use std::collections::BTreeSet;

/// CleanupPackagesUseCase - removes the packages a check flagged
///
/// Exactly the matched package set is removed. Reverse dependencies are not
/// considered.
pub struct CleanupPackagesUseCase<DR, IC, HI, PR, RM> {
    check: CheckLifecycleUseCase<DR, IC, HI, PR>,
    remover: RM,
}

impl<DR, IC, HI, PR, RM> CleanupPackagesUseCase<DR, IC, HI, PR, RM>
where
    DR: DatasetReader,
    IC: InventoryCollector,
    HI: HostInfo,
    PR: ProgressReporter,
    RM: PackageRemover,
{
    pub fn new(check: CheckLifecycleUseCase<DR, IC, HI, PR>, remover: RM) -> Self {
        Self { check, remover }
    }

    pub fn execute(&self, request: &CleanupRequest) -> Result<CheckReport> {
        let result = self.check.match_installed(&request.check)?;
        let mut report = CheckReportBuilder::build(&result);
        let reporter = self.check.progress_reporter();

        if report.packages_to_remove.is_empty() {
            reporter.report_completion("Nothing to remove");
            return Ok(report);
        }

        if request.dry_run {
            reporter.report(&format!(
                "🧪 Dry run: would remove {} package(s): {}",
                report.packages_to_remove.len(),
                report.packages_to_remove.join(" ")
            ));
            report.removal = Some(CheckReportBuilder::dry_run_summary());
            return Ok(report);
        }

        let packages: BTreeSet<String> = report.packages_to_remove.iter().cloned().collect();
        reporter.report_step(&format!("Removing {} package(s)...", packages.len()));
        let removal = self.remover.remove(&packages)?;
        let summary = CheckReportBuilder::removal_summary(&removal);

        if summary.failed.is_empty() {
            reporter.report_completion(&format!("Removed {} package(s)", summary.removed.len()));
        } else {
            for failure in &summary.failed {
                reporter.report_error(&format!("Failed to remove {}: {}", failure.package, failure.reason));
            }
        }

        report.removal = Some(summary);
        Ok(report)
    }
}
