/// System adapters wrapping the rpm and dnf command-line tools
mod dnf_remover;
mod rpm_inventory;

pub use dnf_remover::DnfPackageRemover;
pub use rpm_inventory::{parse_rpm_modularity_output, RpmDumpInventoryCollector, RpmInventoryCollector};
