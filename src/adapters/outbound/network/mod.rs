/// Network adapters for the Red Hat SSO and lifecycle APIs
mod redhat_lifecycle_client;
mod retry;

pub use redhat_lifecycle_client::{FetchConfig, RedHatLifecycleClient};
