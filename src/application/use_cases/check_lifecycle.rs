use crate::application::dto::CheckRequest;
use crate::application::read_models::{CheckReport, CheckReportBuilder};
use crate::lifecycle::domain::{MatchResult, OsMajor};
use crate::lifecycle::policies::EndOfLifePolicy;
use crate::lifecycle::services::LifecycleMatcher;
use crate::ports::outbound::{DatasetReader, HostInfo, InventoryCollector, ProgressReporter};
use crate::shared::Result;
use chrono::{Local, NaiveDate};

/// CheckLifecycleUseCase - matches the installed inventory against the dataset
///
/// # Type Parameters
/// * `DR` - DatasetReader implementation
/// * `IC` - InventoryCollector implementation
/// * `HI` - HostInfo implementation (target major detection)
/// * `PR` - ProgressReporter implementation
pub struct CheckLifecycleUseCase<DR, IC, HI, PR> {
    dataset_reader: DR,
    inventory_collector: IC,
    host_info: HI,
    progress_reporter: PR,
}

impl<DR, IC, HI, PR> CheckLifecycleUseCase<DR, IC, HI, PR>
where
    DR: DatasetReader,
    IC: InventoryCollector,
    HI: HostInfo,
    PR: ProgressReporter,
{
    pub fn new(dataset_reader: DR, inventory_collector: IC, host_info: HI, progress_reporter: PR) -> Self {
        Self {
            dataset_reader,
            inventory_collector,
            host_info,
            progress_reporter,
        }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Runs the check and returns the report view
    pub fn execute(&self, request: &CheckRequest) -> Result<CheckReport> {
        let result = self.match_installed(request)?;
        Ok(CheckReportBuilder::build(&result))
    }

    /// Runs the check and returns the raw match result
    ///
    /// Input errors (bad date, no target major, unreadable dataset or
    /// inventory) fail here, before any matching happens.
    pub fn match_installed(&self, request: &CheckRequest) -> Result<MatchResult> {
        let reference_date = Self::resolve_reference_date(request.reference_date.as_deref())?;
        let target_major = self.resolve_target_major(request.target_major.as_ref())?;

        self.progress_reporter.report(&format!(
            "📖 Loading lifecycle dataset from: {}",
            request.dataset_path.display()
        ));
        let dataset = self.dataset_reader.read_dataset(&request.dataset_path)?;

        self.progress_reporter.report_step("Collecting installed packages...");
        let installed = self.inventory_collector.collect()?;
        self.progress_reporter.report(&format!(
            "✅ Detected {} installed package(s)",
            installed.len()
        ));

        if dataset.bucket(&target_major).is_none() {
            self.progress_reporter.report_warning(&format!(
                "No lifecycle data for target major '{}'; nothing can match",
                target_major
            ));
        }

        let result = LifecycleMatcher::match_installed(&dataset, &target_major, reference_date, &installed);
        self.progress_reporter.report(&format!(
            "🔍 {} package(s) past end-of-life on {} for {}",
            result.matches.len(),
            reference_date,
            target_major
        ));
        Ok(result)
    }

    fn resolve_reference_date(value: Option<&str>) -> Result<NaiveDate> {
        match value {
            Some(value) => EndOfLifePolicy::parse_reference_date(value),
            None => Ok(Local::now().date_naive()),
        }
    }

    fn resolve_target_major(&self, requested: Option<&OsMajor>) -> Result<OsMajor> {
        match requested {
            Some(major) => Ok(major.clone()),
            None => {
                let detected = self.host_info.detect_major()?;
                tracing::debug!(target_major = %detected, "detected target major from host");
                Ok(detected)
            }
        }
    }
}
