use crate::shared::Result;

/// LifecycleRepository port for fetching raw lifecycle metadata
///
/// This port abstracts the vendor API (Red Hat Roadmap) so that the fetch use
/// case can be driven by a canned payload in tests.
pub trait LifecycleRepository {
    /// Fetches the raw lifecycle payload
    ///
    /// # Returns
    /// The response body exactly as received. Extracting the `data` array and
    /// normalizing its records is left to the caller.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Authentication against the SSO endpoint fails
    /// - The API keeps failing after all retries
    /// - The response body is not JSON
    fn fetch_payload(&self) -> Result<serde_json::Value>;
}
