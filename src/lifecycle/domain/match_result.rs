use super::OsMajor;
use chrono::NaiveDate;
use serde::Serialize;

/// One installed package that is past end-of-life
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleMatch {
    pub package_name: String,
    /// Module name; `None` for module-less package groups
    pub module: Option<String>,
    pub stream: Option<String>,
    pub end_of_life: NaiveDate,
}

impl LifecycleMatch {
    /// `module:stream` label, when the match came from a module stream
    pub fn module_label(&self) -> Option<String> {
        match (&self.module, &self.stream) {
            (Some(module), Some(stream)) => Some(format!("{}:{}", module, stream)),
            _ => None,
        }
    }
}

/// Result of one check run. Built fresh on every invocation, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub target_major: OsMajor,
    pub reference_date: NaiveDate,
    /// Sorted by package name, one element per package
    pub matches: Vec<LifecycleMatch>,
}

impl MatchResult {
    pub fn empty(target_major: OsMajor, reference_date: NaiveDate) -> Self {
        Self {
            target_major,
            reference_date,
            matches: Vec::new(),
        }
    }

    pub fn any_match(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Package names to hand to the remover, in output order
    pub fn package_names(&self) -> Vec<String> {
        self.matches.iter().map(|m| m.package_name.clone()).collect()
    }
}
