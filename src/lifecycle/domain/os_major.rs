use crate::shared::error::AppStreamError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key prefix used for OS majors in the dataset (`el8`, `el9`, ...)
const MAJOR_PREFIX: &str = "el";

/// NewType wrapper for an OS major identifier such as `el9`
///
/// Always stored in canonical `el<N>` form with `N > 0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OsMajor(String);

impl OsMajor {
    /// Builds an OS major from its numeric version (`9` -> `el9`)
    pub fn from_number(major: u32) -> Result<Self> {
        if major == 0 {
            return Err(AppStreamError::InvalidTargetMajor {
                value: major.to_string(),
            }
            .into());
        }
        Ok(Self(format!("{}{}", MAJOR_PREFIX, major)))
    }

    /// Parses the spellings seen in vendor data and on the command line:
    /// `el9`, `EL9`, `rhel9`, `9`, `9.4`.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || AppStreamError::InvalidTargetMajor {
            value: value.to_string(),
        };

        let lowered = value.trim().to_ascii_lowercase();
        let digits = lowered
            .strip_prefix("rhel")
            .or_else(|| lowered.strip_prefix(MAJOR_PREFIX))
            .unwrap_or(&lowered);
        let major_part = digits.split('.').next().unwrap_or_default();

        if major_part.is_empty() || !major_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid().into());
        }

        let major: u32 = major_part.parse().map_err(|_| invalid())?;
        Self::from_number(major).map_err(|_| invalid().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OsMajor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OsMajor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OsMajor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<OsMajor> for String {
    fn from(major: OsMajor) -> Self {
        major.0
    }
}
