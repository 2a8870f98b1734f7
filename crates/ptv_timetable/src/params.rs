//! Ordered query parameters
//!
//! The request signature is computed over the serialized query string, so
//! parameters keep their insertion order end to end.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::urlencoding;

/// A query parameter value: one value, or a sequence emitted as repeated keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Emitted as a single `key=value` pair
    Single(String),
    /// Emitted as one `key=value` pair per element, in order
    Multiple(Vec<String>),
}

impl ParamValue {
    /// Values in emission order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

/// Endpoint-specific query parameters in caller order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Create an empty parameter list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter (builder style)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a sequence parameter from anything displayable (builder style)
    #[must_use]
    pub fn with_all<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: fmt::Display,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect::<Vec<_>>();
        self.push(key, ParamValue::Multiple(values));
        self
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Append every entry of `other` whose key was not present before the merge
    ///
    /// Repeated keys within `other` are all kept.
    pub fn merge(&mut self, other: Self) {
        let existing = self.entries.len();
        for (key, value) in other.entries {
            if !self.entries[..existing].iter().any(|(k, _)| *k == key) {
                self.entries.push((key, value));
            }
        }
    }

    /// Check whether a key has been set
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Value for a key, if set
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct entries (sequences count once)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no parameters are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encoded `key=value` pairs, sequences expanded in order
    pub(crate) fn encoded_pairs(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(key, value)| {
                value
                    .values()
                    .map(move |v| format!("{key}={}", urlencoding::encode(v)))
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// Disruption status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisruptionStatus {
    /// Disruptions in effect now
    Current,
    /// Disruptions scheduled for later
    Planned,
}

impl DisruptionStatus {
    /// Query value expected by the API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Planned => "planned",
        }
    }
}

impl fmt::Display for DisruptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
