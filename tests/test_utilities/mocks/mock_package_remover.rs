use appstream_check::ports::outbound::{RemovalReport, RemovalStatus};
use appstream_check::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex};

/// Mock PackageRemover recording every call
#[derive(Default, Clone)]
pub struct MockPackageRemover {
    pub calls: Arc<Mutex<Vec<BTreeSet<String>>>>,
    stuck: HashSet<String>,
}

impl MockPackageRemover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages that stay installed after removal
    pub fn with_stuck_package(mut self, package: &str) -> Self {
        self.stuck.insert(package.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<BTreeSet<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl PackageRemover for MockPackageRemover {
    fn remove(&self, packages: &BTreeSet<String>) -> Result<RemovalReport> {
        self.calls.lock().unwrap().push(packages.clone());

        let outcomes = packages
            .iter()
            .map(|package| {
                let status = if self.stuck.contains(package) {
                    RemovalStatus::Failed {
                        reason: "still installed after dnf remove".to_string(),
                    }
                } else {
                    RemovalStatus::Removed
                };
                (package.clone(), status)
            })
            .collect();

        Ok(RemovalReport { outcomes })
    }
}
