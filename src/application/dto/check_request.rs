use crate::lifecycle::domain::OsMajor;
use std::path::PathBuf;

/// CheckRequest - input of the check use case
#[derive(Debug, Clone)]
pub struct CheckRequest {
    /// Grouped dataset written by `fetch`
    pub dataset_path: PathBuf,
    /// `None` means detect from the running host
    pub target_major: Option<OsMajor>,
    /// Operator-supplied `YYYY-MM-DD`; `None` means today
    pub reference_date: Option<String>,
}

impl CheckRequest {
    pub fn new(dataset_path: PathBuf) -> Self {
        Self {
            dataset_path,
            target_major: None,
            reference_date: None,
        }
    }

    pub fn with_target_major(mut self, target_major: Option<OsMajor>) -> Self {
        self.target_major = target_major;
        self
    }

    pub fn with_reference_date(mut self, reference_date: Option<String>) -> Self {
        self.reference_date = reference_date;
        self
    }
}

/// CleanupRequest - a check followed by removal of the matched packages
#[derive(Debug, Clone)]
pub struct CleanupRequest {
    pub check: CheckRequest,
    /// Report what would be removed without calling the remover
    pub dry_run: bool,
}

impl CleanupRequest {
    pub fn new(check: CheckRequest, dry_run: bool) -> Self {
        Self { check, dry_run }
    }
}
