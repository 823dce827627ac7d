use crate::application::read_models::CheckReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonFormatter adapter producing pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &CheckReport) -> Result<String> {
        let mut output = serde_json::to_string_pretty(report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report to JSON: {}", e))?;
        output.push('\n');
        Ok(output)
    }
}
