use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - nothing past end-of-life, or `--fail-on-match` not requested
    Success = 0,
    /// End-of-life packages were detected and `--fail-on-match` was requested
    EndOfLifeDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (dataset, inventory, network, file I/O, etc.)
    ApplicationError = 3,
    /// Package removal ran but at least one package is still installed
    RemovalFailed = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::EndOfLifeDetected => write!(f, "End-of-life Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::RemovalFailed => write!(f, "Removal Failed (4)"),
        }
    }
}

/// Fatal errors. Anything in here stops the run before matching or removal starts.
///
/// Per-record data problems in vendor data are not represented here; they are
/// reported as `SkipEvent`s next to the successful output.
#[derive(Debug, Error)]
pub enum AppStreamError {
    #[error("Dataset file not found: {path}\n\n💡 Hint: Run `appstream-check fetch` first or pass --dataset <PATH>")]
    DatasetNotFound { path: PathBuf },

    #[error("Failed to parse dataset file: {path}\nDetails: {details}\n\n💡 Hint: The file must map OS majors (el8, el9) to modules, streams and {{packages, end_of_life}}")]
    DatasetParseError { path: PathBuf, details: String },

    #[error("Invalid date format '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid target major '{value}'\n\n💡 Hint: Use a value such as el8, el9 or 9")]
    InvalidTargetMajor { value: String },

    #[error("Unable to detect the target major from {path}: {reason}\n\n💡 Hint: Pass --target-major explicitly")]
    TargetMajorDetection { path: PathBuf, reason: String },

    #[error("Failed to collect installed packages: {details}\n\n💡 Hint: Verify that rpm is installed and the RPM database is readable")]
    InventoryError { details: String },

    #[error("Offline access token is empty\n\n💡 Hint: Export OFFLINE_ACCESS_TOKEN with a token from https://access.redhat.com/management/api")]
    MissingOfflineToken,

    #[error("Login failed (HTTP {status}): {body}")]
    AuthenticationFailed { status: u16, body: String },

    #[error("AppStreams request failed (HTTP {status}): {body}")]
    LifecycleApiError { status: u16, body: String },

    #[error("Unexpected AppStreams response: {details}")]
    MalformedPayload { details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory is writable")]
    FileWriteError { path: PathBuf, details: String },
}
