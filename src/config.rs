//! Configuration file support for appstream-check.
//!
//! Provides YAML-based configuration through `appstream-check.config.yml`
//! files, and the merge of command-line arguments over file values over
//! built-in defaults.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::adapters::outbound::network::FetchConfig;
use crate::application::dto::{CheckRequest, FetchRequest, OutputFormat};
use crate::cli::{CheckArgs, CleanupArgs, FetchArgs};
use crate::lifecycle::domain::OsMajor;
use crate::ports::outbound::DatasetFormat;
use crate::shared::security::read_checked_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "appstream-check.config.yml";
pub const DEFAULT_DATASET_FILE: &str = "redhat_appstreams.yml";
pub const DEFAULT_OUTPUT_VAR: &str = "appstream_check_grouped";
const MAX_RETRIES_LIMIT: u32 = 10;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub dataset_file: Option<PathBuf>,
    pub target_major: Option<String>,
    pub format: Option<String>,
    pub fail_on_match: Option<bool>,
    pub use_sudo: Option<bool>,
    pub fetch: Option<FetchSection>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// `fetch:` section of the config file.
#[derive(Debug, Deserialize, Default)]
pub struct FetchSection {
    pub sso_token_url: Option<String>,
    pub client_id: Option<String>,
    pub appstreams_url: Option<String>,
    pub trust_env: Option<bool>,
    pub max_retries: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub output_file: Option<PathBuf>,
    pub output_format: Option<String>,
    pub output_var: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_checked_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Explicit `--config` wins; otherwise look for the file in the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => load_config_from_path(path).map(Some),
        None => discover_config(Path::new(".")),
    }
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("Invalid config: format: {}", e))?;
    }
    if let Some(major) = &config.target_major {
        OsMajor::parse(major).with_context(|| "Invalid config: target_major")?;
    }

    let Some(fetch) = &config.fetch else {
        return Ok(());
    };
    if let Some(format) = &fetch.output_format {
        format
            .parse::<DatasetFormat>()
            .map_err(|e| anyhow::anyhow!("Invalid config: fetch.output_format: {}", e))?;
    }
    if let Some(retries) = fetch.max_retries {
        if retries == 0 || retries > MAX_RETRIES_LIMIT {
            bail!(
                "Invalid config: fetch.max_retries must be between 1 and {} (got {}).",
                MAX_RETRIES_LIMIT,
                retries
            );
        }
    }
    if fetch.timeout_secs == Some(0) {
        bail!("Invalid config: fetch.timeout_secs must be greater than 0.");
    }
    for (field, url) in [
        ("sso_token_url", &fetch.sso_token_url),
        ("appstreams_url", &fetch.appstreams_url),
    ] {
        if let Some(url) = url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                bail!(
                    "Invalid config: fetch.{} must be an http(s) URL (got '{}').\n\n\
                     💡 Hint: Leave it unset to use the Red Hat default.",
                    field,
                    url
                );
            }
        }
    }
    if let Some(var) = &fetch.output_var {
        if var.trim().is_empty() {
            bail!("Invalid config: fetch.output_var must not be empty.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!("Unknown config field '{}' will be ignored.", key);
    }
    if let Some(fetch) = &config.fetch {
        for key in fetch.unknown_fields.keys() {
            warn!("Unknown config field 'fetch.{}' will be ignored.", key);
        }
    }
}

/// Fully merged settings for `check`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSettings {
    pub dataset_path: PathBuf,
    pub target_major: Option<OsMajor>,
    pub reference_date: Option<String>,
    pub format: OutputFormat,
    pub fail_on_match: bool,
    pub inventory_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl CheckSettings {
    /// CLI > config file > defaults
    pub fn resolve(args: &CheckArgs, config: Option<&ConfigFile>) -> Result<Self> {
        let target_major = match args
            .target_major
            .as_deref()
            .or_else(|| config.and_then(|c| c.target_major.as_deref()))
        {
            Some(value) => Some(OsMajor::parse(value)?),
            None => None,
        };

        let format = match args.format {
            Some(format) => format,
            None => match config.and_then(|c| c.format.as_deref()) {
                Some(value) => value.parse().map_err(|e: String| anyhow::anyhow!(e))?,
                None => OutputFormat::default(),
            },
        };

        Ok(Self {
            dataset_path: args
                .dataset
                .clone()
                .or_else(|| config.and_then(|c| c.dataset_file.clone()))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_FILE)),
            target_major,
            reference_date: args.date.clone(),
            format,
            fail_on_match: args.fail_on_match || config.and_then(|c| c.fail_on_match).unwrap_or(false),
            inventory_file: args.inventory_file.clone(),
            output: args.output.clone(),
        })
    }

    pub fn to_request(&self) -> CheckRequest {
        CheckRequest::new(self.dataset_path.clone())
            .with_target_major(self.target_major.clone())
            .with_reference_date(self.reference_date.clone())
    }
}

/// Fully merged settings for `cleanup`.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupSettings {
    pub check: CheckSettings,
    pub dry_run: bool,
    pub use_sudo: bool,
}

impl CleanupSettings {
    pub fn resolve(args: &CleanupArgs, config: Option<&ConfigFile>) -> Result<Self> {
        Ok(Self {
            check: CheckSettings::resolve(&args.check, config)?,
            dry_run: args.dry_run,
            use_sudo: args.sudo || config.and_then(|c| c.use_sudo).unwrap_or(false),
        })
    }
}

/// Fully merged settings for `fetch`.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request: FetchRequest,
    pub client: FetchConfig,
}

impl FetchSettings {
    pub fn resolve(args: &FetchArgs, config: Option<&ConfigFile>) -> Result<Self> {
        let section = config.and_then(|c| c.fetch.as_ref());
        let from_section = |f: fn(&FetchSection) -> Option<String>| section.and_then(f);

        let output_format = match args.output_format {
            Some(format) => format,
            None => match section.and_then(|s| s.output_format.as_deref()) {
                Some(value) => value.parse().map_err(|e: String| anyhow::anyhow!(e))?,
                None => DatasetFormat::default(),
            },
        };
        let output_var = args
            .output_var
            .clone()
            .or_else(|| from_section(|s| s.output_var.clone()))
            .unwrap_or_else(|| DEFAULT_OUTPUT_VAR.to_string());

        let mut client = FetchConfig::new(args.offline_token.clone().unwrap_or_default());
        if let Some(url) = from_section(|s| s.sso_token_url.clone()) {
            client.sso_token_url = url;
        }
        if let Some(id) = from_section(|s| s.client_id.clone()) {
            client.client_id = id;
        }
        if let Some(url) = from_section(|s| s.appstreams_url.clone()) {
            client.appstreams_url = url;
        }
        client.trust_env = args.trust_env || section.and_then(|s| s.trust_env).unwrap_or(false);
        if let Some(retries) = section.and_then(|s| s.max_retries) {
            client.max_retries = retries;
        }
        if let Some(secs) = section.and_then(|s| s.timeout_secs) {
            client.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            request: FetchRequest {
                output_file: args
                    .output_file
                    .clone()
                    .or_else(|| section.and_then(|s| s.output_file.clone()))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_FILE)),
                output_format,
                output_var: (output_format == DatasetFormat::Yaml).then_some(output_var),
                print_raw: args.print_raw,
            },
            client,
        })
    }
}
