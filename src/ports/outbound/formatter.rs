use crate::application::read_models::CheckReport;
use crate::shared::Result;

/// ReportFormatter port for rendering a check report
///
/// Implementations exist for plain text, JSON and YAML.
pub trait ReportFormatter {
    /// Formats the report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &CheckReport) -> Result<String>;
}
