use crate::lifecycle::domain::GroupedDataset;
use crate::shared::Result;
use std::path::Path;

/// Serialization used for a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetFormat {
    Json,
    #[default]
    Yaml,
}

impl std::str::FromStr for DatasetFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(DatasetFormat::Json),
            "yaml" | "yml" => Ok(DatasetFormat::Yaml),
            _ => Err(format!(
                "Invalid dataset format: {}. Please specify 'json' or 'yaml'",
                s
            )),
        }
    }
}

/// DatasetReader port for loading a grouped dataset produced by `fetch`
pub trait DatasetReader {
    /// Reads and parses the dataset file at `path`
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or not a dataset.
    fn read_dataset(&self, path: &Path) -> Result<GroupedDataset>;
}

/// DatasetWriter port for persisting a grouped dataset
pub trait DatasetWriter {
    /// Writes the dataset to `path`. Readers never observe a partial file.
    ///
    /// `variable` wraps the YAML document under a top-level key when given.
    fn write_dataset(
        &self,
        dataset: &GroupedDataset,
        path: &Path,
        format: DatasetFormat,
        variable: Option<&str>,
    ) -> Result<()>;
}
