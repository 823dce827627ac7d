use crate::lifecycle::domain::InstalledItem;
use crate::shared::Result;

/// InventoryCollector port for reading the installed package set
///
/// Implementations take a fresh snapshot on every call; nothing is cached.
pub trait InventoryCollector {
    /// Collects every installed package together with its module context
    ///
    /// # Errors
    /// Returns an error if the package database cannot be queried or its
    /// output cannot be parsed.
    fn collect(&self) -> Result<Vec<InstalledItem>>;
}
