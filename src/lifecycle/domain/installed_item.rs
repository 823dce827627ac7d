use super::MatchKey;

/// One installed package as seen on the host
///
/// `enabled_module`/`enabled_stream` are `None` when the package was installed
/// outside any module context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledItem {
    pub package_name: String,
    pub enabled_module: Option<String>,
    pub enabled_stream: Option<String>,
}

impl InstalledItem {
    /// A package installed without module context
    pub fn standalone(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            enabled_module: None,
            enabled_stream: None,
        }
    }

    /// A package installed from a module stream
    pub fn modular(
        package_name: impl Into<String>,
        module: impl Into<String>,
        stream: impl Into<String>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            enabled_module: Some(module.into()),
            enabled_stream: Some(stream.into()),
        }
    }

    /// Module key when both module and stream are known
    pub fn module_key(&self) -> Option<MatchKey> {
        match (&self.enabled_module, &self.enabled_stream) {
            (Some(module), Some(stream)) => Some(MatchKey::module(module.clone(), stream.clone())),
            _ => None,
        }
    }
}
