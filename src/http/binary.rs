//! Binary body detection for trigger results.
//!
//! Decision order:
//! 1. A compressed `content-encoding` is always binary.
//! 2. With configured media-type patterns, binary iff one matches.
//! 3. Otherwise binary unless the content type is a known textual family.

use axum::http::header::{CONTENT_ENCODING, CONTENT_TYPE};
use axum::http::HeaderMap;

use crate::http::headers::HeaderCollection;

const COMPRESSED_ENCODINGS: [&str; 4] = ["gzip", "deflate", "compress", "br"];

const TEXT_SUBTYPES: [&str; 5] = ["plain", "html", "css", "javascript", "csv"];

/// Decide whether a response body has to be base64-encoded.
pub fn is_binary_response(headers: &HeaderMap, binary_media_types: &[String]) -> bool {
    if let Some(encoding) = headers.joined(CONTENT_ENCODING.as_str()) {
        if is_compressed(&encoding) {
            return true;
        }
    }

    let content_type = headers.joined(CONTENT_TYPE.as_str()).unwrap_or_default();

    if !binary_media_types.is_empty() {
        return binary_media_types
            .iter()
            .any(|pattern| matches_media_pattern(&content_type, pattern));
    }

    !is_textual(&content_type)
}

/// Case-sensitive prefix match against the compressed encodings.
pub fn is_compressed(content_encoding: &str) -> bool {
    COMPRESSED_ENCODINGS
        .iter()
        .any(|encoding| content_encoding.starts_with(encoding))
}

/// Match a content type against one configured pattern.
///
/// A pattern matches when it is a substring of the content type, when it is
/// `*/*`, or when it ends in `/*` and the content type starts with the part
/// before the wildcard.
pub fn matches_media_pattern(content_type: &str, pattern: &str) -> bool {
    if content_type.contains(pattern) || pattern == "*/*" {
        return true;
    }
    pattern
        .strip_suffix("/*")
        .is_some_and(|prefix| content_type.starts_with(prefix))
}

/// Textual families used when no patterns are configured.
///
/// A missing content type counts as text.
pub fn is_textual(content_type: &str) -> bool {
    if content_type.is_empty() {
        return true;
    }
    if let Some(subtype) = content_type.strip_prefix("text/") {
        return TEXT_SUBTYPES.iter().any(|t| subtype.starts_with(t));
    }
    if let Some(subtype) = content_type.strip_prefix("application/") {
        return subtype.contains("json") || subtype.contains("xml");
    }
    content_type.starts_with("image/svg+xml")
}
