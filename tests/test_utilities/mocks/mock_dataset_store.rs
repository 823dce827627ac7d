use appstream_check::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock DatasetReader serving an in-memory dataset
pub struct MockDatasetReader {
    dataset: Option<GroupedDataset>,
}

impl MockDatasetReader {
    pub fn new(dataset: GroupedDataset) -> Self {
        Self {
            dataset: Some(dataset),
        }
    }

    /// Simulates a missing dataset file
    pub fn missing() -> Self {
        Self { dataset: None }
    }
}

impl DatasetReader for MockDatasetReader {
    fn read_dataset(&self, path: &Path) -> Result<GroupedDataset> {
        self.dataset
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Dataset file not found: {}", path.display()))
    }
}

/// One captured `write_dataset` call
#[derive(Debug, Clone)]
pub struct WrittenDataset {
    pub dataset: GroupedDataset,
    pub path: PathBuf,
    pub format: DatasetFormat,
    pub variable: Option<String>,
}

/// Mock DatasetWriter recording what would have been written
#[derive(Default, Clone)]
pub struct MockDatasetWriter {
    pub writes: Arc<Mutex<Vec<WrittenDataset>>>,
}

impl MockDatasetWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> Vec<WrittenDataset> {
        self.writes.lock().unwrap().clone()
    }
}

impl DatasetWriter for MockDatasetWriter {
    fn write_dataset(
        &self,
        dataset: &GroupedDataset,
        path: &Path,
        format: DatasetFormat,
        variable: Option<&str>,
    ) -> Result<()> {
        self.writes.lock().unwrap().push(WrittenDataset {
            dataset: dataset.clone(),
            path: path.to_path_buf(),
            format,
            variable: variable.map(str::to_string),
        });
        Ok(())
    }
}
