use crate::shared::Result;
use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of removing one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemovalStatus {
    Removed,
    Failed { reason: String },
}

/// Per-package outcome of a removal run, ordered by package name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemovalReport {
    pub outcomes: Vec<(String, RemovalStatus)>,
}

impl RemovalReport {
    pub fn removed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, status)| matches!(status, RemovalStatus::Removed))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn failed(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|(name, status)| match status {
                RemovalStatus::Failed { reason } => Some((name.as_str(), reason.as_str())),
                RemovalStatus::Removed => None,
            })
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed().is_empty()
    }
}

/// PackageRemover port for uninstalling packages
pub trait PackageRemover {
    /// Removes exactly the given packages
    ///
    /// Callers never pass an empty set. A package that could not be removed
    /// is reported as `Failed` in the report rather than as an `Err`.
    ///
    /// # Errors
    /// Returns an error only if the removal could not be attempted at all.
    fn remove(&self, packages: &BTreeSet<String>) -> Result<RemovalReport>;
}
