pub mod grouped_dataset;
pub mod installed_item;
pub mod lifecycle_record;
pub mod match_result;
pub mod normalized_entry;
pub mod os_major;

pub use grouped_dataset::{
    DatasetDocument, DatasetRecord, GroupedDataset, InsertOutcome, MajorBucket, NO_STREAM_KEY,
};
pub use installed_item::InstalledItem;
pub use lifecycle_record::{LifecycleRecord, OneOrMany, Scalar, IMPL_DNF_MODULE, IMPL_PACKAGE};
pub use match_result::{LifecycleMatch, MatchResult};
pub use normalized_entry::{MatchKey, NormalizedEntry};
pub use os_major::OsMajor;
