//! Echo application used by the command-line tool.
//!
//! Answers every request with a JSON description of what it received.

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use indexmap::IndexMap;
use serde_json::json;

use crate::http::HeaderCollection;

const ECHO_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Router that echoes method, URL, headers and body for any path.
pub fn echo_app() -> Router {
    Router::new().fallback(echo)
}

async fn echo(request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, ECHO_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => return (StatusCode::PAYLOAD_TOO_LARGE, e.to_string()).into_response(),
    };

    let mut headers: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, value) in parts.headers.combined() {
        headers.entry(name).or_default().push(value);
    }

    Json(json!({
        "method": parts.method.as_str(),
        "url": parts.uri.to_string(),
        "headers": headers,
        "body": String::from_utf8_lossy(&bytes),
    }))
    .into_response()
}
