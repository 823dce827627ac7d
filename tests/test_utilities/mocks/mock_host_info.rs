use appstream_check::prelude::*;

/// Mock HostInfo reporting a fixed major, or failing detection
pub struct MockHostInfo {
    major: Option<String>,
}

impl MockHostInfo {
    pub fn new(major: &str) -> Self {
        Self {
            major: Some(major.to_string()),
        }
    }

    pub fn undetectable() -> Self {
        Self { major: None }
    }
}

impl HostInfo for MockHostInfo {
    fn detect_major(&self) -> Result<OsMajor> {
        match &self.major {
            Some(major) => OsMajor::parse(major),
            None => anyhow::bail!("Cannot detect target major: /etc/os-release not readable"),
        }
    }
}
