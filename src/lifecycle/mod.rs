/// Lifecycle domain: normalizing vendor records, grouping them into the
/// dataset and matching the installed inventory against it.
///
/// Everything in here is pure and synchronous; I/O lives behind the ports.
pub mod domain;
pub mod policies;
pub mod services;
