use crate::lifecycle::domain::InstalledItem;
use crate::ports::outbound::InventoryCollector;
use crate::shared::error::AppStreamError;
use crate::shared::security::read_checked_file;
use crate::shared::Result;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Query format producing `NAME MODULARITYLABEL` per installed package
pub const RPM_QUERY_FORMAT: &str = "%{NAME} %{MODULARITYLABEL}\n";

/// Label rpm prints for packages that were not installed from a module
const NO_MODULE_LABEL: &str = "(none)";

/// Parses `rpm -qa --qf '%{NAME} %{MODULARITYLABEL}\n'` output.
///
/// A label of `(none)` means no module context; any other label must look
/// like `module:stream[:version:context]`.
///
/// # Errors
/// Returns `AppStreamError::InventoryError` on the first malformed line.
pub fn parse_rpm_modularity_output(output: &str) -> Result<Vec<InstalledItem>> {
    let mut items = Vec::new();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (package_name, label) = line
            .split_once(char::is_whitespace)
            .map(|(name, label)| (name.trim(), label.trim()))
            .filter(|(name, label)| !name.is_empty() && !label.is_empty())
            .ok_or_else(|| AppStreamError::InventoryError {
                details: format!("unexpected rpm output line (expected 2 columns): '{}'", line),
            })?;

        if label == NO_MODULE_LABEL {
            items.push(InstalledItem::standalone(package_name));
            continue;
        }

        let mut parts = label.split(':');
        match (parts.next(), parts.next()) {
            (Some(module), Some(stream)) if !module.is_empty() && !stream.is_empty() => {
                items.push(InstalledItem::modular(package_name, module, stream));
            }
            _ => {
                return Err(AppStreamError::InventoryError {
                    details: format!(
                        "invalid MODULARITYLABEL for package '{}': '{}'",
                        package_name, label
                    ),
                }
                .into())
            }
        }
    }

    Ok(items)
}

/// RpmInventoryCollector adapter querying the live RPM database
pub struct RpmInventoryCollector;

impl RpmInventoryCollector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RpmInventoryCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryCollector for RpmInventoryCollector {
    fn collect(&self) -> Result<Vec<InstalledItem>> {
        debug!("Querying installed RPM packages with modularity labels");

        let output = Command::new("rpm")
            .args(["-qa", "--qf", RPM_QUERY_FORMAT])
            .output()
            .map_err(|e| AppStreamError::InventoryError {
                details: format!("failed to run rpm: {}", e),
            })?;

        if !output.status.success() {
            return Err(AppStreamError::InventoryError {
                details: format!(
                    "rpm -qa exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }
            .into());
        }

        let items = parse_rpm_modularity_output(&String::from_utf8_lossy(&output.stdout))?;
        debug!(count = items.len(), "collected installed packages");
        Ok(items)
    }
}

/// RpmDumpInventoryCollector adapter reading a saved `rpm -qa` dump
///
/// Lets a dataset be checked against another host's inventory.
pub struct RpmDumpInventoryCollector {
    path: PathBuf,
}

impl RpmDumpInventoryCollector {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl InventoryCollector for RpmDumpInventoryCollector {
    fn collect(&self) -> Result<Vec<InstalledItem>> {
        let content = read_checked_file(&self.path, "inventory file").map_err(|e| {
            AppStreamError::InventoryError {
                details: e.to_string(),
            }
        })?;
        let items = parse_rpm_modularity_output(&content)?;
        debug!(path = %self.path.display(), count = items.len(), "read inventory dump");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_standalone_and_modular_lines() {
        let output = "bash (none)\nnodejs nodejs:18:8090020230810123456:a75119d5\nnpm nodejs:18:8090020230810123456:a75119d5\n\n";
        let items = parse_rpm_modularity_output(output).unwrap();

        assert_eq!(
            items,
            vec![
                InstalledItem::standalone("bash"),
                InstalledItem::modular("nodejs", "nodejs", "18"),
                InstalledItem::modular("npm", "nodejs", "18"),
            ]
        );
    }

    #[test]
    fn test_parse_label_without_version() {
        let items = parse_rpm_modularity_output("perl perl:5.32\n").unwrap();
        assert_eq!(items, vec![InstalledItem::modular("perl", "perl", "5.32")]);
    }

    #[test]
    fn test_parse_rejects_single_column() {
        let err = parse_rpm_modularity_output("bash\n").unwrap_err();
        assert!(err.to_string().contains("expected 2 columns"));
    }

    #[test]
    fn test_parse_rejects_bad_label() {
        for line in ["nodejs nodejs\n", "nodejs :18\n", "nodejs nodejs:\n"] {
            let err = parse_rpm_modularity_output(line).unwrap_err();
            assert!(err.to_string().contains("invalid MODULARITYLABEL"), "{}", line);
        }
    }

    #[test]
    fn test_dump_collector_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rpm_qa.txt");
        fs::write(&path, "bash (none)\nnodejs nodejs:18:1:abc\n").unwrap();

        let items = RpmDumpInventoryCollector::new(path).collect().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_dump_collector_missing_file() {
        let err = RpmDumpInventoryCollector::new(PathBuf::from("/nonexistent/rpm_qa.txt"))
            .collect()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to collect installed packages"));
    }
}
