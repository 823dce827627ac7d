use crate::lifecycle::domain::{DatasetDocument, GroupedDataset, OsMajor};
use crate::ports::outbound::{DatasetFormat, DatasetReader, DatasetWriter};
use crate::shared::error::AppStreamError;
use crate::shared::security::read_checked_file;
use crate::shared::Result;
use serde_yaml_ng::{Mapping, Value};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// DatasetFile adapter for reading and writing grouped datasets
///
/// The reader accepts YAML and JSON (JSON is parsed as YAML), either bare or
/// wrapped under a single variable name as written for Ansible `include_vars`.
/// Writes go through a temporary file in the target directory and are
/// renamed into place.
pub struct DatasetFile;

impl DatasetFile {
    pub fn new() -> Self {
        Self
    }

    fn parse(content: &str) -> std::result::Result<DatasetDocument, String> {
        let value: Value = serde_yaml_ng::from_str(content).map_err(|e| e.to_string())?;
        let value = match value {
            Value::Null => Value::Mapping(Mapping::new()),
            other => other,
        };
        let value = Self::unwrap_variable(stringify_keys(value));
        serde_yaml_ng::from_value(value).map_err(|e| e.to_string())
    }

    /// `{appstream_check_grouped: {el9: ...}}` -> `{el9: ...}`
    fn unwrap_variable(value: Value) -> Value {
        let Value::Mapping(mapping) = &value else {
            return value;
        };
        if mapping.len() != 1 {
            return value;
        }
        let Some((Value::String(key), inner @ Value::Mapping(_))) = mapping.iter().next() else {
            return value;
        };
        if OsMajor::parse(key).is_ok() {
            return value;
        }
        debug!(variable = %key, "unwrapping dataset variable");
        inner.clone()
    }

    fn render(
        document: &DatasetDocument,
        format: DatasetFormat,
        variable: Option<&str>,
    ) -> Result<String> {
        match format {
            DatasetFormat::Json => Ok(serde_json::to_string_pretty(document)? + "\n"),
            DatasetFormat::Yaml => match variable {
                Some(variable) => {
                    let wrapped = std::collections::BTreeMap::from([(variable, document)]);
                    Ok(serde_yaml_ng::to_string(&wrapped)?)
                }
                None => Ok(serde_yaml_ng::to_string(document)?),
            },
        }
    }
}

impl Default for DatasetFile {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetReader for DatasetFile {
    fn read_dataset(&self, path: &Path) -> Result<GroupedDataset> {
        if !path.exists() {
            return Err(AppStreamError::DatasetNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let parse_error = |details: String| AppStreamError::DatasetParseError {
            path: path.to_path_buf(),
            details,
        };

        let content = read_checked_file(path, "dataset file").map_err(|e| parse_error(e.to_string()))?;
        let document = Self::parse(&content).map_err(parse_error)?;
        let (dataset, warnings) =
            GroupedDataset::from_document(document).map_err(|e| parse_error(e.to_string()))?;

        for warning in warnings {
            warn!(path = %path.display(), "{}", warning);
        }
        debug!(
            path = %path.display(),
            majors = dataset.majors().count(),
            entries = dataset.entry_count(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

impl DatasetWriter for DatasetFile {
    fn write_dataset(
        &self,
        dataset: &GroupedDataset,
        path: &Path,
        format: DatasetFormat,
        variable: Option<&str>,
    ) -> Result<()> {
        let write_error = |details: String| AppStreamError::FileWriteError {
            path: path.to_path_buf(),
            details,
        };

        let content = Self::render(&dataset.to_document(), format, variable)?;

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !directory.is_dir() {
            return Err(write_error(format!(
                "Parent directory does not exist: {}",
                directory.display()
            ))
            .into());
        }
        if path.is_symlink() {
            return Err(write_error(
                "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
            )
            .into());
        }

        let mut temp = NamedTempFile::new_in(directory).map_err(|e| write_error(e.to_string()))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| write_error(e.to_string()))?;
        temp.persist(path).map_err(|e| write_error(e.error.to_string()))?;

        debug!(path = %path.display(), bytes = content.len(), "dataset written");
        Ok(())
    }
}

/// Hand-written YAML may leave stream keys such as `8.1` or `18` unquoted
fn stringify_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, inner)| {
                    let key = match key {
                        Value::Number(n) => Value::String(n.to_string()),
                        Value::Bool(b) => Value::String(b.to_string()),
                        other => other,
                    };
                    (key, stringify_keys(inner))
                })
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(stringify_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::domain::{MatchKey, NormalizedEntry};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    fn el9() -> OsMajor {
        OsMajor::parse("el9").unwrap()
    }

    fn sample_dataset() -> GroupedDataset {
        let mut dataset = GroupedDataset::new();
        dataset.insert(
            &el9(),
            NormalizedEntry::new(
                "nodejs".to_string(),
                Some("18".to_string()),
                BTreeSet::from(["nodejs".to_string(), "npm".to_string()]),
                BTreeSet::from([el9()]),
                NaiveDate::from_ymd_opt(2025, 4, 30),
            ),
        );
        dataset.insert(
            &el9(),
            NormalizedEntry::new(
                "python3.11".to_string(),
                None,
                BTreeSet::new(),
                BTreeSet::from([el9()]),
                None,
            ),
        );
        dataset
    }

    #[test]
    fn test_yaml_written_wrapped_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("redhat_appstreams.yml");
        let store = DatasetFile::new();

        store
            .write_dataset(&sample_dataset(), &path, DatasetFormat::Yaml, Some("appstream_check_grouped"))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("appstream_check_grouped:"));
        assert!(content.contains("(none)"));

        let reloaded = store.read_dataset(&path).unwrap();
        assert_eq!(reloaded, sample_dataset());
    }

    #[test]
    fn test_json_written_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dataset.json");
        let store = DatasetFile::new();

        store
            .write_dataset(&sample_dataset(), &path, DatasetFormat::Json, None)
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["el9"]["nodejs"]["18"]["end_of_life"], "2025-04-30");

        assert_eq!(store.read_dataset(&path).unwrap(), sample_dataset());
    }

    #[test]
    fn test_write_is_byte_identical_for_same_input() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a.yml");
        let second = temp_dir.path().join("b.yml");
        let store = DatasetFile::new();

        store.write_dataset(&sample_dataset(), &first, DatasetFormat::Yaml, None).unwrap();
        store.write_dataset(&sample_dataset(), &second, DatasetFormat::Yaml, None).unwrap();
        assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
    }

    #[test]
    fn test_read_unquoted_stream_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dataset.yml");
        fs::write(
            &path,
            "el8:\n  php:\n    8.1:\n      packages: [php]\n      end_of_life: 2025-11-30\n",
        )
        .unwrap();

        let dataset = DatasetFile::new().read_dataset(&path).unwrap();
        let bucket = dataset.bucket(&OsMajor::parse("el8").unwrap()).unwrap();
        assert!(bucket.get(&MatchKey::module("php", "8.1")).is_some());
    }

    #[test]
    fn test_read_missing_file() {
        let err = DatasetFile::new()
            .read_dataset(Path::new("/nonexistent/redhat_appstreams.yml"))
            .unwrap_err();
        assert!(err.to_string().contains("Dataset file not found"));
    }

    #[test]
    fn test_read_invalid_structure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dataset.yml");
        fs::write(&path, "- just\n- a list\n").unwrap();

        let err = DatasetFile::new().read_dataset(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse dataset file"));
    }

    #[test]
    fn test_read_empty_file_is_empty_dataset() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dataset.yml");
        fs::write(&path, "").unwrap();

        assert!(DatasetFile::new().read_dataset(&path).unwrap().is_empty());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let err = DatasetFile::new()
            .write_dataset(
                &sample_dataset(),
                Path::new("/nonexistent/dir/out.yml"),
                DatasetFormat::Yaml,
                None,
            )
            .unwrap_err();
        assert!(err.to_string().contains("Parent directory does not exist"));
    }
}
