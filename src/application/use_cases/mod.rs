/// Use cases module containing application business logic orchestration
mod check_lifecycle;
mod cleanup_packages;
mod fetch_lifecycle_data;

pub use check_lifecycle::CheckLifecycleUseCase;
pub use cleanup_packages::CleanupPackagesUseCase;
pub use fetch_lifecycle_data::FetchLifecycleDataUseCase;
