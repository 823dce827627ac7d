/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (vendor API, file system, rpm/dnf, console).
pub mod dataset_store;
pub mod formatter;
pub mod host_info;
pub mod inventory_collector;
pub mod lifecycle_repository;
pub mod output_presenter;
pub mod package_remover;
pub mod progress_reporter;

pub use dataset_store::{DatasetFormat, DatasetReader, DatasetWriter};
pub use formatter::ReportFormatter;
pub use host_info::HostInfo;
pub use inventory_collector::InventoryCollector;
pub use lifecycle_repository::LifecycleRepository;
pub use output_presenter::OutputPresenter;
pub use package_remover::{PackageRemover, RemovalReport, RemovalStatus};
pub use progress_reporter::ProgressReporter;
