use super::OsMajor;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

/// Key under which an entry is stored in one OS-major bucket
///
/// Module streams are keyed by `(name, stream)`, module-less package groups by
/// their bare name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKey {
    Module { name: String, stream: String },
    Package(String),
}

impl MatchKey {
    pub fn module(name: impl Into<String>, stream: impl Into<String>) -> Self {
        MatchKey::Module {
            name: name.into(),
            stream: stream.into(),
        }
    }

    pub fn package(name: impl Into<String>) -> Self {
        MatchKey::Package(name.into())
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKey::Module { name, stream } => write!(f, "{}:{}", name, stream),
            MatchKey::Package(name) => write!(f, "{}", name),
        }
    }
}

/// One lifecycle rule after normalization
///
/// Invariant: `packages` is never empty. `stream == None` marks a module-less
/// package group and `end_of_life == None` means indefinite support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    name: String,
    stream: Option<String>,
    packages: BTreeSet<String>,
    applicable_majors: BTreeSet<OsMajor>,
    end_of_life: Option<NaiveDate>,
}

impl NormalizedEntry {
    /// Creates an entry. An empty package set falls back to `{name}`.
    pub fn new(
        name: String,
        stream: Option<String>,
        packages: BTreeSet<String>,
        applicable_majors: BTreeSet<OsMajor>,
        end_of_life: Option<NaiveDate>,
    ) -> Self {
        let packages = if packages.is_empty() {
            BTreeSet::from([name.clone()])
        } else {
            packages
        };

        Self {
            name,
            stream,
            packages,
            applicable_majors,
            end_of_life,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stream(&self) -> Option<&str> {
        self.stream.as_deref()
    }

    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    pub fn applicable_majors(&self) -> &BTreeSet<OsMajor> {
        &self.applicable_majors
    }

    pub fn end_of_life(&self) -> Option<NaiveDate> {
        self.end_of_life
    }

    pub fn is_module(&self) -> bool {
        self.stream.is_some()
    }

    pub fn match_key(&self) -> MatchKey {
        match &self.stream {
            Some(stream) => MatchKey::module(self.name.clone(), stream.clone()),
            None => MatchKey::package(self.name.clone()),
        }
    }

    /// Same entry restricted to a single OS major (used when bucketing)
    pub fn for_major(&self, major: &OsMajor) -> Self {
        Self {
            applicable_majors: BTreeSet::from([major.clone()]),
            ..self.clone()
        }
    }
}
