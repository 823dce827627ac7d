use crate::lifecycle::domain::{
    LifecycleRecord, NormalizedEntry, OsMajor, IMPL_DNF_MODULE, IMPL_PACKAGE,
};
use crate::lifecycle::policies::EndOfLifePolicy;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a vendor record was left out of the dataset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("record is not a lifecycle object ({0})")]
    Malformed(String),
    #[error("record has no name")]
    MissingName,
    #[error("record has no usable OS major")]
    MissingOsMajor,
    #[error("unsupported implementation kind '{0}'")]
    UnsupportedImpl(String),
    #[error("dnf module record has no stream")]
    MissingStream,
}

/// A single data-quality problem found while normalizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipEvent {
    /// Position of the record in the vendor payload
    pub index: usize,
    pub name: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for SkipEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "record #{} ({}): {}", self.index, name, self.reason),
            None => write!(f, "record #{}: {}", self.index, self.reason),
        }
    }
}

/// Normalized entries plus the records that had to be skipped
#[derive(Debug, Clone, Default)]
pub struct NormalizationOutcome {
    pub entries: Vec<NormalizedEntry>,
    pub skipped: Vec<SkipEvent>,
}

/// RecordNormalizer - turns raw vendor records into `NormalizedEntry` values
///
/// Pure transform. Problems with individual records never abort the run:
/// they become `SkipEvent`s returned next to the entries.
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// Normalizes raw JSON values from the API `data` array.
    /// Values that do not deserialize into a record are skipped as `Malformed`.
    pub fn normalize_values(values: &[serde_json::Value]) -> NormalizationOutcome {
        let mut outcome = NormalizationOutcome::default();

        for (index, value) in values.iter().enumerate() {
            match serde_json::from_value::<LifecycleRecord>(value.clone()) {
                Ok(record) => Self::normalize_into(index, &record, &mut outcome),
                Err(e) => Self::skip(
                    &mut outcome,
                    SkipEvent {
                        index,
                        name: value
                            .get("name")
                            .and_then(|n| n.as_str())
                            .map(str::to_string),
                        reason: SkipReason::Malformed(e.to_string()),
                    },
                ),
            }
        }

        outcome
    }

    /// Normalizes already-typed records
    pub fn normalize(records: &[LifecycleRecord]) -> NormalizationOutcome {
        let mut outcome = NormalizationOutcome::default();
        for (index, record) in records.iter().enumerate() {
            Self::normalize_into(index, record, &mut outcome);
        }
        outcome
    }

    fn normalize_into(index: usize, record: &LifecycleRecord, outcome: &mut NormalizationOutcome) {
        let name = match record.trimmed_name() {
            Some(name) => name,
            None => {
                return Self::skip(
                    outcome,
                    SkipEvent {
                        index,
                        name: None,
                        reason: SkipReason::MissingName,
                    },
                )
            }
        };
        let skip_named = |reason| SkipEvent {
            index,
            name: Some(name.clone()),
            reason,
        };

        let majors = Self::applicable_majors(index, &name, record);
        if majors.is_empty() {
            return Self::skip(outcome, skip_named(SkipReason::MissingOsMajor));
        }

        let streams = record.stream_names();
        let is_module = match record.implementation.as_deref().map(str::trim) {
            Some(IMPL_DNF_MODULE) => true,
            Some(IMPL_PACKAGE) => false,
            Some(other) => {
                return Self::skip(outcome, skip_named(SkipReason::UnsupportedImpl(other.to_string())))
            }
            None => !streams.is_empty(),
        };
        if is_module && streams.is_empty() {
            return Self::skip(outcome, skip_named(SkipReason::MissingStream));
        }

        let end_date = record.end_date_text();
        let end_of_life = EndOfLifePolicy::parse_end_of_life(end_date.as_deref());
        if let (Some(raw), None) = (&end_date, end_of_life) {
            debug!(index, name = %name, end_date = %raw, "end date not parseable, treating as indefinite");
        }

        let packages: BTreeSet<String> = record
            .packages
            .iter()
            .flatten()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        if is_module {
            for stream in streams {
                outcome.entries.push(NormalizedEntry::new(
                    name.clone(),
                    Some(stream),
                    packages.clone(),
                    majors.clone(),
                    end_of_life,
                ));
            }
        } else {
            // The vendor `stream` of a plain package is a version label, not a module stream
            outcome.entries.push(NormalizedEntry::new(
                name,
                None,
                packages,
                majors,
                end_of_life,
            ));
        }
    }

    fn applicable_majors(index: usize, name: &str, record: &LifecycleRecord) -> BTreeSet<OsMajor> {
        record
            .os_major_values()
            .iter()
            .filter_map(|value| match OsMajor::parse(value) {
                Ok(major) => Some(major),
                Err(_) => {
                    debug!(index, name, os_major = %value, "ignoring unusable os_major value");
                    None
                }
            })
            .collect()
    }

    fn skip(outcome: &mut NormalizationOutcome, event: SkipEvent) {
        warn!("Skipping lifecycle {}", event);
        outcome.skipped.push(event);
    }
}
