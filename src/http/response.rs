//! Canonical response → trigger result.
//!
//! # Responsibilities
//! - Collect the response body (the only await in the converter)
//! - Decide between text and base64 bodies
//! - Lift `set-cookie` out of the header map into a `Set-Cookie` list
//! - Emit single-value or multi-value header maps
//!
//! # Design Decisions
//! - `encode_response` is pure, so converting the same response twice
//!   yields identical results
//! - Binary bodies are encoded from the collected bytes; for UTF-8 bodies
//!   this equals encoding the decoded text

use axum::body::Body;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, Response, StatusCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, ConvertResult};
use crate::http::binary::is_binary_response;
use crate::http::headers::HeaderCollection;

/// Key under which cookies are surfaced in a trigger result.
pub const SET_COOKIE_KEY: &str = "Set-Cookie";

/// Options for shaping trigger results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConversionOptions {
    /// Content-type patterns that force base64. Empty enables the heuristic.
    #[serde(alias = "binaryMediaTypes")]
    pub binary_media_types: Vec<String>,

    /// Emit `multiValueHeaders` instead of `headers`.
    #[serde(alias = "multiValueHeaders")]
    pub multi_value_headers: bool,

    /// Maximum response body size in bytes. Unbounded when unset.
    #[serde(alias = "bodyLimit", skip_serializing_if = "Option::is_none")]
    pub body_limit: Option<usize>,
}

impl ResponseConversionOptions {
    pub fn with_binary_media_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binary_media_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_multi_value_headers(mut self, enabled: bool) -> Self {
        self.multi_value_headers = enabled;
        self
    }
}

/// Result handed back to the trigger.
///
/// Carries `headers`, `multiValueHeaders`, or both when cookies accompany a
/// single-value result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResult {
    pub status_code: u16,
    pub body: String,
    pub is_base64_encoded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<IndexMap<String, Vec<String>>>,
}

/// Convert a canonical response, collecting its body.
pub async fn to_trigger_result(
    response: Response<Body>,
    options: &ResponseConversionOptions,
) -> ConvertResult<TriggerResult> {
    let (parts, body) = response.into_parts();
    let limit = options.body_limit.unwrap_or(usize::MAX);
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(ConvertError::Body)?;

    let result = encode_response(parts.status, &parts.headers, &bytes, options);

    tracing::debug!(
        status = result.status_code,
        base64 = result.is_base64_encoded,
        body_len = bytes.len(),
        "Built trigger result from response"
    );

    Ok(result)
}

/// Shape a trigger result from an already collected response.
pub fn encode_response(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    options: &ResponseConversionOptions,
) -> TriggerResult {
    let is_base64_encoded = is_binary_response(headers, &options.binary_media_types);
    let body = if is_base64_encoded {
        STANDARD.encode(body)
    } else {
        String::from_utf8_lossy(body).into_owned()
    };
    let cookies = headers.set_cookies();

    let mut result = TriggerResult {
        status_code: status.as_u16(),
        body,
        is_base64_encoded,
        headers: None,
        multi_value_headers: None,
    };

    if options.multi_value_headers {
        let mut map = multi_value_header_map(headers);
        if !cookies.is_empty() {
            map.insert(SET_COOKIE_KEY.to_string(), cookies);
        }
        result.multi_value_headers = Some(map);
    } else {
        result.headers = Some(single_value_header_map(headers));
        if !cookies.is_empty() {
            result.multi_value_headers =
                Some(IndexMap::from([(SET_COOKIE_KEY.to_string(), cookies)]));
        }
    }

    result
}

fn single_value_header_map(headers: &HeaderMap) -> IndexMap<String, String> {
    headers
        .combined()
        .into_iter()
        .filter(|(name, _)| name != SET_COOKIE.as_str())
        .collect()
}

fn multi_value_header_map(headers: &HeaderMap) -> IndexMap<String, Vec<String>> {
    let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, value) in headers.combined() {
        if name == SET_COOKIE.as_str() {
            continue;
        }
        map.entry(name).or_default().push(value);
    }
    map
}
