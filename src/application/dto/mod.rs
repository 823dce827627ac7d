/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the CLI and the use cases,
/// keeping the lifecycle domain isolated.
mod check_request;
mod fetch_request;
mod fetch_response;
mod output_format;

pub use check_request::{CheckRequest, CleanupRequest};
pub use fetch_request::FetchRequest;
pub use fetch_response::FetchResponse;
pub use output_format::OutputFormat;
