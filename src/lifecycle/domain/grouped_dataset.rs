use super::{MatchKey, NormalizedEntry, OsMajor};
use crate::lifecycle::policies::EndOfLifePolicy;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stream key used in the dataset file for module-less package groups
pub const NO_STREAM_KEY: &str = "(none)";

/// What changed when an entry was inserted into a bucket
#[derive(Debug, Default)]
pub struct InsertOutcome {
    /// Entry previously stored under the same key, if any
    pub replaced: Option<NormalizedEntry>,
    /// Package names taken over from another module-less entry: `(package, previous owner)`
    pub reclaimed_packages: Vec<(String, String)>,
}

/// All lifecycle entries applicable to one OS major
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MajorBucket {
    entries: BTreeMap<MatchKey, NormalizedEntry>,
    /// package name -> module-less entries listing it, in insertion order;
    /// the last one owns the package
    package_claims: BTreeMap<String, Vec<String>>,
}

impl MajorBucket {
    /// Inserts an entry; an existing entry with the same key is replaced
    /// (later input wins).
    pub fn insert(&mut self, entry: NormalizedEntry) -> InsertOutcome {
        let key = entry.match_key();
        let mut outcome = InsertOutcome::default();

        if let Some(previous) = self.entries.remove(&key) {
            if !previous.is_module() {
                // Packages only the replaced entry listed fall back to earlier claimants
                for owners in self.package_claims.values_mut() {
                    owners.retain(|owner| owner.as_str() != previous.name());
                }
                self.package_claims.retain(|_, owners| !owners.is_empty());
            }
            outcome.replaced = Some(previous);
        }

        if !entry.is_module() {
            for package in entry.packages() {
                let owners = self.package_claims.entry(package.clone()).or_default();
                if let Some(owner) = owners.last() {
                    outcome.reclaimed_packages.push((package.clone(), owner.clone()));
                }
                owners.push(entry.name().to_string());
            }
        }

        self.entries.insert(key, entry);
        outcome
    }

    pub fn get(&self, key: &MatchKey) -> Option<&NormalizedEntry> {
        self.entries.get(key)
    }

    /// Looks up the module-less entry covering a package name: the entry keyed
    /// by that name if it lists the package, then the current claim owner.
    pub fn get_by_package(&self, package_name: &str) -> Option<&NormalizedEntry> {
        self.entries
            .get(&MatchKey::package(package_name))
            .filter(|entry| entry.packages().contains(package_name))
            .or_else(|| {
                self.package_claims
                    .get(package_name)
                    .and_then(|owners| owners.last())
                    .and_then(|owner| self.entries.get(&MatchKey::package(owner.as_str())))
            })
    }

    pub fn entries(&self) -> impl Iterator<Item = &NormalizedEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lifecycle data indexed by OS major, then by match key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedDataset {
    buckets: BTreeMap<OsMajor, MajorBucket>,
}

impl GroupedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, major: &OsMajor, entry: NormalizedEntry) -> InsertOutcome {
        self.buckets
            .entry(major.clone())
            .or_default()
            .insert(entry.for_major(major))
    }

    pub fn bucket(&self, major: &OsMajor) -> Option<&MajorBucket> {
        self.buckets.get(major)
    }

    pub fn majors(&self) -> impl Iterator<Item = &OsMajor> {
        self.buckets.keys()
    }

    /// Total number of (major, key) entries
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(MajorBucket::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Converts to the on-disk shape: major -> name -> stream -> record
    pub fn to_document(&self) -> DatasetDocument {
        let mut document = DatasetDocument::new();
        for (major, bucket) in &self.buckets {
            let names = document.entry(major.to_string()).or_default();
            for entry in bucket.entries() {
                names.entry(entry.name().to_string()).or_default().insert(
                    entry.stream().unwrap_or(NO_STREAM_KEY).to_string(),
                    DatasetRecord {
                        packages: entry.packages().iter().cloned().collect(),
                        end_of_life: entry.end_of_life().map(|d| d.format("%Y-%m-%d").to_string()),
                    },
                );
            }
        }
        document
    }

    /// Rebuilds a dataset from its on-disk shape.
    ///
    /// Unparseable `end_of_life` values are read as `None`; the returned
    /// warnings list each of them.
    ///
    /// # Errors
    /// Returns an error if a top-level key is not an OS major.
    pub fn from_document(document: DatasetDocument) -> Result<(Self, Vec<String>)> {
        let mut dataset = Self::new();
        let mut warnings = Vec::new();

        for (major_key, names) in document {
            let major = OsMajor::parse(&major_key)
                .map_err(|e| anyhow::anyhow!("top-level key '{}': {}", major_key, e))?;
            // Keep empty majors visible so that "no data" differs from "unknown major"
            dataset.buckets.entry(major.clone()).or_default();

            for (name, streams) in names {
                for (stream_key, record) in streams {
                    let end_of_life =
                        EndOfLifePolicy::parse_end_of_life(record.end_of_life.as_deref());
                    if let (Some(raw), None) = (record.end_of_life.as_deref(), end_of_life) {
                        warnings.push(format!(
                            "{}/{}/{}: end_of_life '{}' is not a date, treating as no end date",
                            major, name, stream_key, raw
                        ));
                    }

                    let stream = (stream_key != NO_STREAM_KEY).then_some(stream_key);
                    let entry = NormalizedEntry::new(
                        name.clone(),
                        stream,
                        record.packages.into_iter().collect(),
                        BTreeSet::from([major.clone()]),
                        end_of_life,
                    );
                    dataset.insert(&major, entry);
                }
            }
        }

        Ok((dataset, warnings))
    }
}

/// Serialized dataset: major -> module/package name -> stream (or `(none)`) -> record
pub type DatasetDocument = BTreeMap<String, BTreeMap<String, BTreeMap<String, DatasetRecord>>>;

/// Leaf of the dataset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub end_of_life: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn major(value: &str) -> OsMajor {
        OsMajor::parse(value).unwrap()
    }

    fn entry(name: &str, stream: Option<&str>, packages: &[&str], eol: Option<&str>) -> NormalizedEntry {
        NormalizedEntry::new(
            name.to_string(),
            stream.map(str::to_string),
            packages.iter().map(|p| p.to_string()).collect(),
            BTreeSet::from([major("el9")]),
            eol.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
        )
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let mut bucket = MajorBucket::default();
        assert!(bucket
            .insert(entry("nodejs", Some("18"), &[], Some("2025-04-30")))
            .replaced
            .is_none());

        let outcome = bucket.insert(entry("nodejs", Some("18"), &[], Some("2026-04-30")));
        assert!(outcome.replaced.is_some());
        assert_eq!(bucket.len(), 1);
        assert_eq!(
            bucket.get(&MatchKey::module("nodejs", "18")).unwrap().end_of_life(),
            NaiveDate::from_ymd_opt(2026, 4, 30)
        );
    }

    #[test]
    fn test_streams_of_same_module_coexist() {
        let mut bucket = MajorBucket::default();
        bucket.insert(entry("nodejs", Some("18"), &[], None));
        bucket.insert(entry("nodejs", Some("20"), &[], None));
        assert_eq!(bucket.len(), 2);
    }

    #[test]
    fn test_get_by_package_uses_claims() {
        let mut bucket = MajorBucket::default();
        bucket.insert(entry("python39", None, &["python39", "python39-libs"], None));

        assert_eq!(bucket.get_by_package("python39-libs").unwrap().name(), "python39");
        assert_eq!(bucket.get_by_package("python39").unwrap().name(), "python39");
        assert!(bucket.get_by_package("python3.11").is_none());
    }

    #[test]
    fn test_package_claim_conflict_later_entry_wins() {
        let mut bucket = MajorBucket::default();
        bucket.insert(entry("php-old", None, &["php-cli"], None));
        let outcome = bucket.insert(entry("php-new", None, &["php-cli"], None));

        assert_eq!(
            outcome.reclaimed_packages,
            vec![("php-cli".to_string(), "php-old".to_string())]
        );
        assert_eq!(bucket.get_by_package("php-cli").unwrap().name(), "php-new");
    }

    #[test]
    fn test_module_entries_do_not_claim_packages() {
        let mut bucket = MajorBucket::default();
        bucket.insert(entry("nodejs", Some("18"), &["nodejs"], Some("2020-01-01")));
        assert!(bucket.get_by_package("nodejs").is_none());
    }

    #[test]
    fn test_document_round_trip_keeps_shape() {
        let mut dataset = GroupedDataset::new();
        dataset.insert(&major("el9"), entry("nodejs", Some("18"), &["nodejs"], Some("2025-04-30")));
        dataset.insert(&major("el9"), entry("python3.11", None, &[], None));

        let document = dataset.to_document();
        let el9 = &document["el9"];
        assert_eq!(el9["nodejs"]["18"].end_of_life.as_deref(), Some("2025-04-30"));
        assert_eq!(el9["python3.11"][NO_STREAM_KEY].end_of_life, None);

        let (reloaded, warnings) = GroupedDataset::from_document(document).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(reloaded, dataset);
    }

    #[test]
    fn test_from_document_lenient_end_of_life() {
        let mut document = DatasetDocument::new();
        document.entry("el9".to_string()).or_default().insert(
            "bad-date-pkg".to_string(),
            BTreeMap::from([(
                NO_STREAM_KEY.to_string(),
                DatasetRecord {
                    packages: vec![],
                    end_of_life: Some("garbage".to_string()),
                },
            )]),
        );

        let (dataset, warnings) = GroupedDataset::from_document(document).unwrap();
        let bucket = dataset.bucket(&major("el9")).unwrap();
        assert_eq!(bucket.get_by_package("bad-date-pkg").unwrap().end_of_life(), None);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("garbage"));
    }

    #[test]
    fn test_from_document_rejects_unknown_top_level_key() {
        let mut document = DatasetDocument::new();
        document.insert("metadata".to_string(), BTreeMap::new());
        let err = GroupedDataset::from_document(document).unwrap_err();
        assert!(err.to_string().contains("metadata"));
    }

    #[test]
    fn test_empty_major_bucket_is_kept() {
        let mut document = DatasetDocument::new();
        document.insert("el8".to_string(), BTreeMap::new());
        let (dataset, _) = GroupedDataset::from_document(document).unwrap();
        assert!(dataset.bucket(&major("el8")).unwrap().is_empty());
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_replaced_claim_falls_back_to_earlier_entry() {
        let mut bucket = MajorBucket::default();
        bucket.insert(entry("php-a", None, &["php-cli"], Some("2020-01-01")));
        bucket.insert(entry("php-b", None, &["php-cli"], None));
        assert_eq!(bucket.get_by_package("php-cli").unwrap().name(), "php-b");

        let outcome = bucket.insert(entry("php-b", None, &["php-b"], None));
        assert!(outcome.replaced.is_some());
        assert!(outcome.reclaimed_packages.is_empty());
        assert_eq!(bucket.get_by_package("php-cli").unwrap().name(), "php-a");
        assert_eq!(bucket.get_by_package("php-b").unwrap().name(), "php-b");
    }

    #[test]
    fn test_bare_name_key_requires_listed_package() {
        let mut bucket = MajorBucket::default();
        bucket.insert(entry("foo", None, &["foo-libs"], Some("2020-01-01")));

        assert!(bucket.get_by_package("foo").is_none());
        assert_eq!(bucket.get_by_package("foo-libs").unwrap().name(), "foo");
    }
}
