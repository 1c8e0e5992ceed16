//! Fetch-style access to a header collection.
//!
//! # Responsibilities
//! - Case-insensitive get/set/append over `HeaderMap`
//! - Join repeated values with `", "` on read, like the fetch `Headers` API
//! - Keep `set-cookie` values apart; they are never joined
//!
//! # Design Decisions
//! - Names are lowercased on insert (`HeaderName` does this)
//! - Values are trimmed of surrounding HTTP whitespace on insert
//! - Invalid names or values are reported, not dropped

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{ConvertError, ConvertResult};

/// Header collection capability used by both converters.
pub trait HeaderCollection {
    /// All values stored under `name`, joined with `", "`.
    fn joined(&self, name: &str) -> Option<String>;

    /// Replace every value stored under `name`.
    fn set_str(&mut self, name: &str, value: &str) -> ConvertResult<()>;

    /// Add a value under `name`, keeping existing ones.
    fn append_str(&mut self, name: &str, value: &str) -> ConvertResult<()>;

    /// Every `set-cookie` value, in insertion order.
    fn set_cookies(&self) -> Vec<String>;

    /// One `(name, value)` entry per header name with values joined,
    /// except `set-cookie`, which yields one entry per value.
    fn combined(&self) -> Vec<(String, String)>;
}

impl HeaderCollection for HeaderMap {
    fn joined(&self, name: &str) -> Option<String> {
        let mut values = self.get_all(name).iter().map(value_text);
        let first = values.next()?;
        Some(values.fold(first, |mut acc, value| {
            acc.push_str(", ");
            acc.push_str(&value);
            acc
        }))
    }

    fn set_str(&mut self, name: &str, value: &str) -> ConvertResult<()> {
        let value = header_value(name, value)?;
        self.insert(header_name(name)?, value);
        Ok(())
    }

    fn append_str(&mut self, name: &str, value: &str) -> ConvertResult<()> {
        let value = header_value(name, value)?;
        self.append(header_name(name)?, value);
        Ok(())
    }

    fn set_cookies(&self) -> Vec<String> {
        self.get_all(SET_COOKIE).iter().map(value_text).collect()
    }

    fn combined(&self) -> Vec<(String, String)> {
        let mut entries = Vec::with_capacity(self.keys_len());
        for name in self.keys() {
            if *name == SET_COOKIE {
                entries.extend(
                    self.get_all(name)
                        .iter()
                        .map(|value| (name.as_str().to_string(), value_text(value))),
                );
            } else if let Some(value) = self.joined(name.as_str()) {
                entries.push((name.as_str().to_string(), value));
            }
        }
        entries
    }
}

fn header_name(name: &str) -> ConvertResult<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ConvertError::InvalidHeaderName(name.to_string()))
}

fn header_value(name: &str, value: &str) -> ConvertResult<HeaderValue> {
    let trimmed = value.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'));
    HeaderValue::from_bytes(trimmed.as_bytes())
        .map_err(|_| ConvertError::InvalidHeaderValue(name.to_string()))
}

fn value_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}
