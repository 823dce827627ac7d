use crate::ports::outbound::DatasetFormat;
use std::path::PathBuf;

/// FetchRequest - where and how to write the generated dataset
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub output_file: PathBuf,
    pub output_format: DatasetFormat,
    /// Top-level variable wrapping the YAML document; ignored for JSON
    pub output_var: Option<String>,
    /// Return the raw vendor payload and write nothing
    pub print_raw: bool,
}
