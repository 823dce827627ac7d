use serde::Deserialize;

/// Implementation kind of a vendor record for dnf modules
pub const IMPL_DNF_MODULE: &str = "dnf_module";
/// Implementation kind of a vendor record for plain packages
pub const IMPL_PACKAGE: &str = "package";

/// A scalar that the vendor API sends either as a string or as a number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    /// Text form; empty strings are treated as absent
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            Scalar::Text(text) => text.trim().to_string(),
            Scalar::Number(number) => number.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Either a single value or a list of values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

/// Raw lifecycle record as returned by the Red Hat roadmap API
/// (`/api/roadmap/v1/lifecycle/app-streams`, one element of `data`).
///
/// Every field is optional because vendor data is irregular; the normalizer
/// decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LifecycleRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "impl")]
    pub implementation: Option<String>,
    #[serde(default)]
    pub stream: Option<OneOrMany<Scalar>>,
    #[serde(default)]
    pub streams: Option<OneOrMany<Scalar>>,
    #[serde(default)]
    pub os_major: Option<OneOrMany<Scalar>>,
    #[serde(default)]
    pub os_majors: Option<OneOrMany<Scalar>>,
    #[serde(default)]
    pub packages: Option<Vec<String>>,
    /// Kept untyped: anything but a string or number means "no end date"
    #[serde(default)]
    pub end_date: Option<serde_json::Value>,
}

impl LifecycleRecord {
    /// Stream names from `stream` and `streams`, blanks and repeats removed
    pub fn stream_names(&self) -> Vec<String> {
        Self::texts(&[&self.stream, &self.streams])
    }

    /// Raw OS major values from `os_major` and `os_majors`, blanks and repeats removed
    pub fn os_major_values(&self) -> Vec<String> {
        Self::texts(&[&self.os_major, &self.os_majors])
    }

    pub fn end_date_text(&self) -> Option<String> {
        let text = match self.end_date.as_ref()? {
            serde_json::Value::String(text) => text.trim().to_string(),
            serde_json::Value::Number(number) => number.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    fn texts(fields: &[&Option<OneOrMany<Scalar>>]) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for value in fields
            .iter()
            .filter_map(|field| field.as_ref())
            .flat_map(|field| match field {
                OneOrMany::One(value) => std::slice::from_ref(value),
                OneOrMany::Many(values) => values.as_slice(),
            })
            .filter_map(Scalar::as_text)
        {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        values
    }

    pub fn trimmed_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}
