/// Formatter adapters for the check report output formats
mod json_formatter;
mod text_formatter;
mod yaml_formatter;

pub use json_formatter::JsonFormatter;
pub use text_formatter::TextFormatter;
pub use yaml_formatter::YamlFormatter;
