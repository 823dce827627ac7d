use crate::lifecycle::domain::{GroupedDataset, MatchKey, NormalizedEntry, OsMajor};
use tracing::warn;

/// Kind of conflict found while grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionKind {
    /// Two entries produced the same match key; the later one was kept
    DuplicateKey,
    /// Two module-less entries listed the same package; the later one owns it now
    PackageClaim { package: String, previous_owner: String },
}

/// One resolved grouping conflict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub major: OsMajor,
    pub key: MatchKey,
    pub kind: CollisionKind,
}

/// Grouped dataset plus every collision that was resolved on the way
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub dataset: GroupedDataset,
    pub collisions: Vec<KeyCollision>,
}

/// DatasetBuilder - groups normalized entries by OS major and match key
///
/// Collision policy: last write wins. Input order decides, so the same vendor
/// payload always produces the same dataset.
pub struct DatasetBuilder;

impl DatasetBuilder {
    pub fn build(entries: Vec<NormalizedEntry>) -> BuildOutcome {
        let mut outcome = BuildOutcome::default();

        for entry in entries {
            let key = entry.match_key();
            for major in entry.applicable_majors().clone() {
                let inserted = outcome.dataset.insert(&major, entry.clone());

                if let Some(previous) = inserted.replaced {
                    warn!(
                        major = %major,
                        key = %key,
                        previous_end_of_life = ?previous.end_of_life(),
                        end_of_life = ?entry.end_of_life(),
                        "duplicate lifecycle entry, keeping the later one"
                    );
                    outcome.collisions.push(KeyCollision {
                        major: major.clone(),
                        key: key.clone(),
                        kind: CollisionKind::DuplicateKey,
                    });
                }

                for (package, previous_owner) in inserted.reclaimed_packages {
                    warn!(
                        major = %major,
                        package = %package,
                        previous_owner = %previous_owner,
                        owner = %entry.name(),
                        "package claimed by two module-less entries, keeping the later one"
                    );
                    outcome.collisions.push(KeyCollision {
                        major: major.clone(),
                        key: key.clone(),
                        kind: CollisionKind::PackageClaim {
                            package,
                            previous_owner,
                        },
                    });
                }
            }
        }

        outcome
    }
}
