use crate::lifecycle::domain::OsMajor;
use crate::shared::Result;

/// HostInfo port for facts about the running system
pub trait HostInfo {
    /// Detects the OS major of the running host (e.g. `el9`)
    ///
    /// # Errors
    /// Returns an error if the major version cannot be determined.
    fn detect_major(&self) -> Result<OsMajor>;
}
