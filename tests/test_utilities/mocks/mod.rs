//! Mock implementations for testing
#![allow(dead_code)]

mod mock_dataset_store;
mod mock_host_info;
mod mock_inventory_collector;
mod mock_lifecycle_repository;
mod mock_package_remover;
mod mock_progress_reporter;

pub use mock_dataset_store::{MockDatasetReader, MockDatasetWriter};
pub use mock_host_info::MockHostInfo;
pub use mock_inventory_collector::MockInventoryCollector;
pub use mock_lifecycle_repository::MockLifecycleRepository;
pub use mock_package_remover::MockPackageRemover;
pub use mock_progress_reporter::MockProgressReporter;
