use crate::lifecycle::domain::OsMajor;
use crate::ports::outbound::HostInfo;
use crate::shared::error::AppStreamError;
use crate::shared::Result;
use std::fs;
use std::path::PathBuf;

const DEFAULT_OS_RELEASE: &str = "/etc/os-release";

/// OsReleaseHostInfo adapter deriving the OS major from `VERSION_ID`
///
/// `/etc/os-release` is a symlink on most distributions, so it is read
/// without the regular-file checks used for user-supplied inputs.
pub struct OsReleaseHostInfo {
    path: PathBuf,
}

impl OsReleaseHostInfo {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(DEFAULT_OS_RELEASE))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn detection_error(&self, reason: impl Into<String>) -> anyhow::Error {
        AppStreamError::TargetMajorDetection {
            path: self.path.clone(),
            reason: reason.into(),
        }
        .into()
    }
}

impl Default for OsReleaseHostInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl HostInfo for OsReleaseHostInfo {
    fn detect_major(&self) -> Result<OsMajor> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.detection_error(e.to_string()))?;
        let version_id = parse_version_id(&content)
            .ok_or_else(|| self.detection_error("VERSION_ID not found"))?;

        let major = version_id.split('.').next().unwrap_or_default();
        if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
            return Err(self.detection_error(format!(
                "cannot parse major version from VERSION_ID={:?}",
                version_id
            )));
        }

        OsMajor::parse(major).map_err(|e| self.detection_error(e.to_string()))
    }
}

/// Extracts the unquoted `VERSION_ID` value
fn parse_version_id(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("VERSION_ID="))
        .map(|value| value.trim().trim_matches(['"', '\'']).to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn host_with(content: &str) -> (TempDir, OsReleaseHostInfo) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("os-release");
        fs::write(&path, content).unwrap();
        (temp_dir, OsReleaseHostInfo::with_path(path))
    }

    #[test]
    fn test_detect_major_from_quoted_version_id() {
        let (_dir, host) = host_with("NAME=\"Red Hat Enterprise Linux\"\nVERSION_ID=\"9.4\"\nID=\"rhel\"\n");
        assert_eq!(host.detect_major().unwrap().as_str(), "el9");
    }

    #[test]
    fn test_detect_major_unquoted() {
        let (_dir, host) = host_with("VERSION_ID=8\n");
        assert_eq!(host.detect_major().unwrap().as_str(), "el8");
    }

    #[test]
    fn test_missing_version_id() {
        let (_dir, host) = host_with("NAME=Fedora\n");
        let err = host.detect_major().unwrap_err();
        assert!(err.to_string().contains("VERSION_ID not found"));
    }

    #[test]
    fn test_non_numeric_version_id() {
        let (_dir, host) = host_with("VERSION_ID=rolling\n");
        let err = host.detect_major().unwrap_err();
        assert!(err.to_string().contains("rolling"));
    }

    #[test]
    fn test_missing_file() {
        let host = OsReleaseHostInfo::with_path(PathBuf::from("/nonexistent/os-release"));
        assert!(host.detect_major().is_err());
    }
}
