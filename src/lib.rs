//! appstream-check - end-of-life checks for RHEL AppStream content
//!
//! This library downloads Red Hat AppStream lifecycle data, turns it into a
//! grouped dataset keyed by OS major, matches the installed rpm inventory
//! against it and optionally removes what is past end-of-life. It follows a
//! hexagonal layout.
//!
//! # Architecture
//!
//! - **Domain Layer** (`lifecycle`): lifecycle records, normalization, grouping and matching
//! - **Application Layer** (`application`): Use cases, requests and report read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Red Hat API client, dataset file, rpm/dnf, console, formatters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use appstream_check::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = CheckLifecycleUseCase::new(
//!     DatasetFile::new(),
//!     RpmInventoryCollector::new(),
//!     OsReleaseHostInfo::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = CheckRequest::new(PathBuf::from("redhat_appstreams.yml"))
//!     .with_reference_date(Some("2026-01-01".to_string()));
//! let report = use_case.execute(&request)?;
//!
//! let output = TextFormatter::new().format(&report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        DatasetFile, FileSystemWriter, OsReleaseHostInfo, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter, YamlFormatter};
    pub use crate::adapters::outbound::network::{FetchConfig, RedHatLifecycleClient};
    pub use crate::adapters::outbound::system::{
        DnfPackageRemover, RpmDumpInventoryCollector, RpmInventoryCollector,
    };
    pub use crate::application::dto::{
        CheckRequest, CleanupRequest, FetchRequest, FetchResponse, OutputFormat,
    };
    pub use crate::application::read_models::CheckReport;
    pub use crate::application::use_cases::{
        CheckLifecycleUseCase, CleanupPackagesUseCase, FetchLifecycleDataUseCase,
    };
    pub use crate::lifecycle::domain::{
        GroupedDataset, InstalledItem, LifecycleMatch, MatchResult, NormalizedEntry, OsMajor,
    };
    pub use crate::lifecycle::services::{DatasetBuilder, LifecycleMatcher, RecordNormalizer};
    pub use crate::ports::outbound::{
        DatasetFormat, DatasetReader, DatasetWriter, HostInfo, InventoryCollector,
        LifecycleRepository, OutputPresenter, PackageRemover, ProgressReporter, ReportFormatter,
    };
    pub use crate::shared::Result;
}
