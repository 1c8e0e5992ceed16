//! Framework-agnostic helpers exposed alongside the converters.

pub mod headers;
pub mod request;

pub use headers::{normalize_headers, parse_multi_value_headers, HeaderField};
pub use request::{is_valid_http_method, sanitize_path, STANDARD_METHODS};
