use crate::lifecycle::domain::{LifecycleMatch, OsMajor};
use chrono::NaiveDate;
use serde::Serialize;

/// Denormalized view of one check (or cleanup) run
///
/// Field names are part of the JSON/YAML output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub target_major: OsMajor,
    pub date: NaiveDate,
    /// Installed module-less packages past end-of-life
    pub matched_packages: Vec<String>,
    /// `module:stream` labels past end-of-life
    pub matched_dnf_modules: Vec<String>,
    /// Installed packages belonging to the matched module streams
    pub matched_dnf_modules_packages: Vec<String>,
    pub packages_to_remove: Vec<String>,
    pub any_match: bool,
    pub matches: Vec<LifecycleMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal: Option<RemovalSummary>,
}

/// What the cleanup step did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemovalSummary {
    pub dry_run: bool,
    pub removed: Vec<String>,
    pub failed: Vec<FailedRemoval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRemoval {
    pub package: String,
    pub reason: String,
}

impl CheckReport {
    pub fn removal_failed(&self) -> bool {
        self.removal.as_ref().is_some_and(|r| !r.failed.is_empty())
    }
}
