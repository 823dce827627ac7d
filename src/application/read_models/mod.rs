//! Read models for CQRS-lite pattern
//!
//! View-optimized structs rendered by the report formatters.

pub mod check_report;
pub mod check_report_builder;

pub use check_report::{CheckReport, FailedRemoval, RemovalSummary};
pub use check_report_builder::CheckReportBuilder;
