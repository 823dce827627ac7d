use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter, YamlFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Belongs in the application layer: it selects an infrastructure adapter
/// based on an application-level choice.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use appstream_check::application::dto::OutputFormat;
    /// use appstream_check::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Yaml);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Yaml => Box::new(YamlFormatter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::CheckReportBuilder;
    use crate::lifecycle::domain::{MatchResult, OsMajor};
    use chrono::NaiveDate;

    fn empty_report() -> crate::application::read_models::CheckReport {
        CheckReportBuilder::build(&MatchResult::empty(
            OsMajor::parse("el9").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        ))
    }

    #[test]
    fn test_each_format_gets_its_formatter() {
        let report = empty_report();

        let text = FormatterFactory::create(OutputFormat::Text).format(&report).unwrap();
        assert!(text.starts_with("Target major: el9"));

        let json = FormatterFactory::create(OutputFormat::Json).format(&report).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let yaml = FormatterFactory::create(OutputFormat::Yaml).format(&report).unwrap();
        assert!(yaml.starts_with("target_major: el9"));
    }
}
