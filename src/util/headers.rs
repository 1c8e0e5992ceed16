//! Conversions between single-string and list header representations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A header value given either as one string or as an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HeaderField {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for HeaderField {
    fn from(value: &str) -> Self {
        HeaderField::One(value.to_string())
    }
}

impl From<String> for HeaderField {
    fn from(value: String) -> Self {
        HeaderField::One(value)
    }
}

impl From<Vec<String>> for HeaderField {
    fn from(values: Vec<String>) -> Self {
        HeaderField::Many(values)
    }
}

/// Collapse a header mapping to single strings.
///
/// Lists are joined with `", "`. Entries whose value is `None` are dropped.
pub fn normalize_headers<I, K>(headers: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = (K, Option<HeaderField>)>,
    K: Into<String>,
{
    headers
        .into_iter()
        .filter_map(|(name, value)| {
            let value = match value? {
                HeaderField::One(value) => value,
                HeaderField::Many(values) => values.join(", "),
            };
            Some((name.into(), value))
        })
        .collect()
}

/// Split a header mapping into lists.
///
/// Strings are split on `", "`; lists pass through untouched.
pub fn parse_multi_value_headers<I, K>(headers: I) -> IndexMap<String, Vec<String>>
where
    I: IntoIterator<Item = (K, HeaderField)>,
    K: Into<String>,
{
    headers
        .into_iter()
        .map(|(name, value)| {
            let values = match value {
                HeaderField::One(value) => value.split(", ").map(str::to_string).collect(),
                HeaderField::Many(values) => values,
            };
            (name.into(), values)
        })
        .collect()
}
