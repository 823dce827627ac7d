mod dataset_builder;
mod lifecycle_matcher;
mod record_normalizer;

pub use dataset_builder::{BuildOutcome, CollisionKind, DatasetBuilder, KeyCollision};
pub use lifecycle_matcher::LifecycleMatcher;
pub use record_normalizer::{NormalizationOutcome, RecordNormalizer, SkipEvent, SkipReason};
