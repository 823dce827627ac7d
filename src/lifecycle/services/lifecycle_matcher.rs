use crate::lifecycle::domain::{
    GroupedDataset, InstalledItem, LifecycleMatch, MatchResult, NormalizedEntry, OsMajor,
};
use crate::lifecycle::policies::EndOfLifePolicy;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// LifecycleMatcher - matches the installed inventory against lifecycle data
///
/// Lookup order per installed package:
/// 1. `(module, stream)` when the package came from a module stream
/// 2. a module-less entry that lists the package name
///
/// A found entry matches when its end-of-life is on or before the reference
/// date. Packages without a lifecycle entry are ignored.
pub struct LifecycleMatcher;

impl LifecycleMatcher {
    pub fn match_installed(
        dataset: &GroupedDataset,
        target_major: &OsMajor,
        reference_date: NaiveDate,
        installed: &[InstalledItem],
    ) -> MatchResult {
        let Some(bucket) = dataset.bucket(target_major) else {
            info!(target_major = %target_major, "no lifecycle data for target major");
            return MatchResult::empty(target_major.clone(), reference_date);
        };

        // BTreeMap keeps output sorted by package name; first match per package wins
        let mut matches: BTreeMap<String, LifecycleMatch> = BTreeMap::new();

        for item in installed {
            let entry = item
                .module_key()
                .and_then(|key| bucket.get(&key))
                .or_else(|| bucket.get_by_package(&item.package_name));

            let Some(entry) = entry else {
                continue;
            };

            let Some(lifecycle_match) = Self::evaluate(entry, item, reference_date) else {
                continue;
            };

            matches
                .entry(item.package_name.clone())
                .or_insert(lifecycle_match);
        }

        debug!(
            target_major = %target_major,
            reference_date = %reference_date,
            installed = installed.len(),
            matched = matches.len(),
            "lifecycle match complete"
        );

        MatchResult {
            target_major: target_major.clone(),
            reference_date,
            matches: matches.into_values().collect(),
        }
    }

    fn evaluate(
        entry: &NormalizedEntry,
        item: &InstalledItem,
        reference_date: NaiveDate,
    ) -> Option<LifecycleMatch> {
        if !EndOfLifePolicy::is_expired(entry.end_of_life(), reference_date) {
            return None;
        }

        Some(LifecycleMatch {
            package_name: item.package_name.clone(),
            module: entry.is_module().then(|| entry.name().to_string()),
            stream: entry.stream().map(str::to_string),
            end_of_life: entry.end_of_life()?,
        })
    }
}
