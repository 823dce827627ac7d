use crate::application::read_models::CheckReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// YamlFormatter adapter
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for YamlFormatter {
    fn format(&self, report: &CheckReport) -> Result<String> {
        serde_yaml_ng::to_string(report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report to YAML: {}", e))
    }
}
