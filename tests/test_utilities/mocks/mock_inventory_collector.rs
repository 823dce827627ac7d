use appstream_check::prelude::*;

/// Mock InventoryCollector returning a canned inventory
pub struct MockInventoryCollector {
    items: Vec<InstalledItem>,
    should_fail: bool,
}

impl MockInventoryCollector {
    pub fn new(items: Vec<InstalledItem>) -> Self {
        Self {
            items,
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            items: vec![],
            should_fail: true,
        }
    }
}

impl InventoryCollector for MockInventoryCollector {
    fn collect(&self) -> Result<Vec<InstalledItem>> {
        if self.should_fail {
            anyhow::bail!("rpm query failed");
        }
        Ok(self.items.clone())
    }
}
