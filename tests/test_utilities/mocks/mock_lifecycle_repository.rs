use appstream_check::prelude::*;
use serde_json::Value;

/// Mock LifecycleRepository returning a canned API payload
pub struct MockLifecycleRepository {
    payload: Value,
}

impl MockLifecycleRepository {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

impl LifecycleRepository for MockLifecycleRepository {
    fn fetch_payload(&self) -> Result<Value> {
        Ok(self.payload.clone())
    }
}
