use crate::application::dto::{FetchRequest, FetchResponse};
use crate::lifecycle::services::{DatasetBuilder, RecordNormalizer};
use crate::ports::outbound::{DatasetWriter, LifecycleRepository, ProgressReporter};
use crate::shared::error::AppStreamError;
use crate::shared::Result;

/// FetchLifecycleDataUseCase - downloads vendor lifecycle data and writes
/// the grouped dataset
///
/// # Type Parameters
/// * `LREPO` - LifecycleRepository implementation
/// * `DW` - DatasetWriter implementation
/// * `PR` - ProgressReporter implementation
pub struct FetchLifecycleDataUseCase<LREPO, DW, PR> {
    repository: LREPO,
    dataset_writer: DW,
    progress_reporter: PR,
}

impl<LREPO, DW, PR> FetchLifecycleDataUseCase<LREPO, DW, PR>
where
    LREPO: LifecycleRepository,
    DW: DatasetWriter,
    PR: ProgressReporter,
{
    pub fn new(repository: LREPO, dataset_writer: DW, progress_reporter: PR) -> Self {
        Self {
            repository,
            dataset_writer,
            progress_reporter,
        }
    }

    pub fn execute(&self, request: &FetchRequest) -> Result<FetchResponse> {
        self.progress_reporter
            .report_step("Fetching AppStream lifecycle data...");
        let payload = self.repository.fetch_payload()?;

        if request.print_raw {
            self.progress_reporter.report("📄 Printing raw response, no dataset written");
            return Ok(FetchResponse {
                raw_payload: Some(payload),
                ..Default::default()
            });
        }

        let records = payload
            .get("data")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppStreamError::MalformedPayload {
                details: "response has no 'data' array".to_string(),
            })?;
        self.progress_reporter
            .report(&format!("✅ Received {} lifecycle record(s)", records.len()));

        let normalized = RecordNormalizer::normalize_values(records);
        if !normalized.skipped.is_empty() {
            self.progress_reporter.report_warning(&format!(
                "Skipped {} record(s) with data-quality problems (see log for details)",
                normalized.skipped.len()
            ));
        }

        let built = DatasetBuilder::build(normalized.entries);
        if !built.collisions.is_empty() {
            self.progress_reporter.report_warning(&format!(
                "{} duplicate lifecycle key(s) resolved, later records kept",
                built.collisions.len()
            ));
        }

        self.dataset_writer.write_dataset(
            &built.dataset,
            &request.output_file,
            request.output_format,
            request.output_var.as_deref(),
        )?;
        self.progress_reporter.report_completion(&format!(
            "Dataset with {} entr{} written to {}",
            built.dataset.entry_count(),
            if built.dataset.entry_count() == 1 { "y" } else { "ies" },
            request.output_file.display()
        ));

        Ok(FetchResponse {
            raw_payload: None,
            written_to: Some(request.output_file.clone()),
            record_count: records.len(),
            entry_count: built.dataset.entry_count(),
            skipped: normalized.skipped,
            collisions: built.collisions,
        })
    }
}
