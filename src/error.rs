//! Conversion error definitions.

use thiserror::Error;

use crate::event::EventKind;

/// Errors raised while converting between trigger events and HTTP messages.
///
/// None of these are recovered inside the converter; the invocation wrapper
/// in [`crate::handler`] is the only place they are turned into a response.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The event was classified but does not deserialize as that shape.
    #[error("malformed {kind} event: {source}")]
    MalformedEvent {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },

    /// The resolved host and path do not form a valid URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL could not be represented as an HTTP request target.
    #[error("invalid request URI: {0}")]
    InvalidUri(#[from] axum::http::uri::InvalidUri),

    /// The method is not a valid HTTP token.
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    /// A header name is not a valid HTTP token.
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    /// A header value contains bytes HTTP does not allow.
    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),

    /// The event body is flagged as base64 but does not decode.
    #[error("invalid base64 body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// Assembling the request failed.
    #[error("failed to build request: {0}")]
    Http(#[from] axum::http::Error),

    /// Collecting the response body failed.
    #[error("failed to read response body: {0}")]
    Body(#[source] axum::Error),
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
