use crate::lifecycle::services::{KeyCollision, SkipEvent};
use std::path::PathBuf;

/// FetchResponse - what the fetch use case produced
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// Set only for `print_raw` requests
    pub raw_payload: Option<serde_json::Value>,
    /// Set when a dataset file was written
    pub written_to: Option<PathBuf>,
    pub record_count: usize,
    pub entry_count: usize,
    pub skipped: Vec<SkipEvent>,
    pub collisions: Vec<KeyCollision>,
}
