//! Trigger event → canonical request.
//!
//! # Responsibilities
//! - Resolve the host (domain name, `host` header, then `localhost`)
//! - Rebuild the query string for v1/ALB; pass v2's raw string through
//! - Merge single- and multi-value headers without repeating values
//! - Decode base64 bodies
//!
//! # Design Decisions
//! - Paths are used verbatim; `util::sanitize_path` is opt-in elsewhere
//! - Method and path are not validated here
//! - URL errors are propagated, never masked
//! - The `host` header is matched case-insensitively, so `Host` counts too;
//!   a literal `headers.host` property read would miss it
//! - Base64 bodies may be line-wrapped or use the URL-safe alphabet

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, Uri};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::{ConvertError, ConvertResult};
use crate::event::{MultiValueMap, SingleValueMap, TriggerEvent};
use crate::http::headers::HeaderCollection;

/// Host used when the event carries none.
pub const FALLBACK_HOST: &str = "localhost";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Standard base64 that accepts bodies with or without padding.
/// URL-safe input is mapped onto this alphabet by `decode_event_body`.
const EVENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Methods the fetch API uppercases when given in another case.
const NORMALIZED_METHODS: [&str; 6] = ["DELETE", "GET", "HEAD", "OPTIONS", "POST", "PUT"];

/// Build the canonical request for a classified event.
pub fn to_web_request(event: &TriggerEvent) -> ConvertResult<Request<Body>> {
    let host = resolve_host(event);
    let query = build_query_string(event);
    let headers = build_headers(event)?;
    let body = build_body(event)?;
    let method = parse_method(event.method())?;

    let mut url = Url::parse(&format!("https://{host}"))?.join(event.path())?;
    if !query.is_empty() {
        url.set_query(Some(&query));
    }
    let uri: Uri = url.as_str().parse()?;

    tracing::debug!(
        kind = %event.kind(),
        method = %method,
        url = %url,
        "Built request from trigger event"
    );

    let mut request = Request::builder().method(method).uri(uri).body(body)?;
    *request.headers_mut() = headers;
    Ok(request)
}

/// Host the request URL is built against.
pub fn resolve_host(event: &TriggerEvent) -> &str {
    let host = match event {
        TriggerEvent::GatewayV2(e) => non_empty(e.request_context.domain_name.as_deref())
            .or_else(|| single_header(e.headers.as_ref(), "host")),
        TriggerEvent::LoadBalancer(e) => single_header(e.headers.as_ref(), "host")
            .or_else(|| first_multi_header(e.multi_value_headers.as_ref(), "host")),
        TriggerEvent::GatewayV1(e) => non_empty(
            e.request_context
                .as_ref()
                .and_then(|ctx| ctx.domain_name.as_deref()),
        )
        .or_else(|| single_header(e.headers.as_ref(), "host")),
    };
    host.unwrap_or(FALLBACK_HOST)
}

/// Query string without the leading `?`; empty when there is none.
pub fn build_query_string(event: &TriggerEvent) -> String {
    match event {
        TriggerEvent::GatewayV2(e) => e.raw_query_string.clone().unwrap_or_default(),
        TriggerEvent::GatewayV1(e) => encode_query(
            e.multi_value_query_string_parameters.as_ref(),
            e.query_string_parameters.as_ref(),
        ),
        TriggerEvent::LoadBalancer(e) => encode_query(
            e.multi_value_query_string_parameters.as_ref(),
            e.query_string_parameters.as_ref(),
        ),
    }
}

/// Headers for the canonical request.
pub fn build_headers(event: &TriggerEvent) -> ConvertResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    match event {
        TriggerEvent::GatewayV2(e) => {
            apply_single_headers(&mut headers, e.headers.as_ref())?;
            if let Some(cookies) = e.cookies.as_ref().filter(|c| !c.is_empty()) {
                headers.set_str("cookie", &cookies.join("; "))?;
            }
        }
        TriggerEvent::GatewayV1(e) => {
            apply_single_headers(&mut headers, e.headers.as_ref())?;
            merge_multi_headers(&mut headers, e.multi_value_headers.as_ref())?;
        }
        TriggerEvent::LoadBalancer(e) => {
            apply_single_headers(&mut headers, e.headers.as_ref())?;
            merge_multi_headers(&mut headers, e.multi_value_headers.as_ref())?;
        }
    }

    Ok(headers)
}

/// Request body; empty when the event has none.
pub fn build_body(event: &TriggerEvent) -> ConvertResult<Body> {
    match event.body() {
        (None, _) | (Some(""), _) => Ok(Body::empty()),
        (Some(body), true) => Ok(Body::from(decode_event_body(body)?)),
        (Some(body), false) => Ok(Body::from(body.to_owned())),
    }
}

/// Decode a base64 body, skipping ASCII whitespace and accepting `-` and
/// `_` in place of `+` and `/`.
fn decode_event_body(body: &str) -> ConvertResult<Vec<u8>> {
    let compact: String = body
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    Ok(EVENT_BASE64.decode(compact)?)
}

fn parse_method(method: &str) -> ConvertResult<Method> {
    let normalized = NORMALIZED_METHODS
        .iter()
        .find(|m| m.eq_ignore_ascii_case(method))
        .copied()
        .unwrap_or(method);
    Method::from_bytes(normalized.as_bytes())
        .map_err(|_| ConvertError::InvalidMethod(method.to_string()))
}

fn encode_query(multi: Option<&MultiValueMap>, single: Option<&SingleValueMap>) -> String {
    let pairs: Vec<String> = if let Some(multi) = multi {
        multi
            .iter()
            .filter_map(|(key, values)| values.as_ref().map(|values| (key, values)))
            .flat_map(|(key, values)| values.iter().map(move |value| encode_pair(key, value)))
            .collect()
    } else if let Some(single) = single {
        single
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| encode_pair(key, value)))
            .collect()
    } else {
        Vec::new()
    };
    pairs.join("&")
}

fn encode_pair(key: &str, value: &str) -> String {
    format!(
        "{}={}",
        utf8_percent_encode(key, URI_COMPONENT),
        utf8_percent_encode(value, URI_COMPONENT)
    )
}

fn apply_single_headers(headers: &mut HeaderMap, map: Option<&SingleValueMap>) -> ConvertResult<()> {
    for (name, value) in map.into_iter().flatten() {
        if let Some(value) = value {
            headers.set_str(name, value)?;
        }
    }
    Ok(())
}

/// Append multi-value entries unless the value already appears in what is
/// stored for that name. The check is substring containment against the
/// joined value captured before the list is applied.
fn merge_multi_headers(headers: &mut HeaderMap, map: Option<&MultiValueMap>) -> ConvertResult<()> {
    for (name, values) in map.into_iter().flatten() {
        let Some(values) = values.as_ref().filter(|v| !v.is_empty()) else {
            continue;
        };
        let existing = headers.joined(name).filter(|e| !e.is_empty());
        for value in values {
            let present = existing
                .as_deref()
                .is_some_and(|existing| existing.contains(value.as_str()));
            if !present {
                headers.append_str(name, value)?;
            }
        }
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn single_header<'a>(map: Option<&'a SingleValueMap>, name: &str) -> Option<&'a str> {
    map?.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| non_empty(value.as_deref()))
}

fn first_multi_header<'a>(map: Option<&'a MultiValueMap>, name: &str) -> Option<&'a str> {
    map?.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.as_ref())
        .and_then(|values| non_empty(values.first().map(String::as_str)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn event(value: Value) -> TriggerEvent {
        TriggerEvent::from_value(value).unwrap()
    }

    async fn body_text(request: Request<Body>) -> String {
        let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_basic_v1_event() {
        let request = to_web_request(&event(json!({
            "httpMethod": "GET",
            "path": "/test",
            "headers": { "host": "api.example.com", "content-type": "application/json" },
            "multiValueHeaders": {},
            "queryStringParameters": null,
            "multiValueQueryStringParameters": null,
            "body": null,
            "isBase64Encoded": false,
            "requestContext": { "domainName": "api.example.com", "stage": "prod" }
        })))
        .unwrap();

        assert_eq!(request.uri().to_string(), "https://api.example.com/test");
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.headers()["host"], "api.example.com");
        assert_eq!(request.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_query_parameters_are_percent_encoded() {
        let request = to_web_request(&event(json!({
            "httpMethod": "GET",
            "path": "/search",
            "headers": { "host": "api.example.com" },
            "queryStringParameters": { "q": "test query", "limit": "10" },
            "requestContext": { "domainName": "api.example.com" }
        })))
        .unwrap();

        assert_eq!(
            request.uri().to_string(),
            "https://api.example.com/search?q=test%20query&limit=10"
        );
    }

    #[test]
    fn test_multi_value_query_takes_precedence() {
        let request = to_web_request(&event(json!({
            "httpMethod": "GET",
            "path": "/filter",
            "queryStringParameters": { "ignored": "yes" },
            "multiValueQueryStringParameters": {
                "tags": ["javascript", "typescript"],
                "empty": [],
                "categories": ["web", "backend"]
            },
            "requestContext": { "domainName": "api.example.com" }
        })))
        .unwrap();

        assert_eq!(
            request.uri().query(),
            Some("tags=javascript&tags=typescript&categories=web&categories=backend")
        );
    }

    #[test]
    fn test_empty_query_maps_add_no_question_mark() {
        let request = to_web_request(&event(json!({
            "httpMethod": "GET",
            "path": "/test",
            "queryStringParameters": {},
            "multiValueQueryStringParameters": {},
            "requestContext": { "domainName": "api.example.com" }
        })))
        .unwrap();

        assert_eq!(request.uri().to_string(), "https://api.example.com/test");
    }

    #[test]
    fn test_encode_query_uses_uri_component_set() {
        let mut single = SingleValueMap::new();
        single.insert("a b".into(), Some("x&y=z/é".into()));
        single.insert("skip".into(), None);
        single.insert("keep".into(), Some("-_.!~*'()".into()));

        assert_eq!(
            encode_query(None, Some(&single)),
            "a%20b=x%26y%3Dz%2F%C3%A9&keep=-_.!~*'()"
        );
    }

    #[test]
    fn test_multi_value_headers_merge_without_duplicates() {
        let request = to_web_request(&event(json!({
            "httpMethod": "POST",
            "path": "/api",
            "headers": { "host": "api.example.com", "x-forwarded-for": "192.168.1.1" },
            "multiValueHeaders": {
                "x-forwarded-for": ["192.168.1.1", "10.0.0.1"],
                "accept": ["application/json", "text/plain"]
            },
            "requestContext": { "domainName": "api.example.com" }
        })))
        .unwrap();

        let headers = request.headers();
        assert_eq!(
            headers.joined("x-forwarded-for").as_deref(),
            Some("192.168.1.1, 10.0.0.1")
        );
        assert_eq!(
            headers.joined("accept").as_deref(),
            Some("application/json, text/plain")
        );
    }

    #[test]
    fn test_append_guard_is_substring_containment() {
        let mut headers = HeaderMap::new();
        headers.set_str("x-forwarded-for", "10.0.0.1").unwrap();

        let mut multi = MultiValueMap::new();
        multi.insert("x-forwarded-for".into(), Some(vec!["1".into(), "10.0.0.2".into()]));
        merge_multi_headers(&mut headers, Some(&multi)).unwrap();

        assert_eq!(
            headers.joined("x-forwarded-for").as_deref(),
            Some("10.0.0.1, 10.0.0.2")
        );
    }

    #[test]
    fn test_null_header_values_are_skipped() {
        let request = to_web_request(&event(json!({
            "httpMethod": "GET",
            "path": "/test",
            "headers": {
                "host": "api.example.com",
                "x-empty": "",
                "x-null": null,
                "x-valid": "value"
            },
            "requestContext": { "domainName": "api.example.com" }
        })))
        .unwrap();

        let headers = request.headers();
        assert_eq!(headers.joined("x-empty").as_deref(), Some(""));
        assert_eq!(headers.joined("x-null"), None);
        assert_eq!(headers.joined("x-valid").as_deref(), Some("value"));
    }

    #[test]
    fn test_host_falls_back_to_localhost() {
        let v1 = event(json!({ "httpMethod": "GET", "path": "/test", "headers": {}, "requestContext": {} }));
        let v2 = event(json!({ "rawPath": "/test", "requestContext": { "http": { "method": "GET" } } }));
        let alb = event(json!({ "httpMethod": "GET", "path": "/test", "requestContext": { "elb": {} } }));

        for e in [&v1, &v2, &alb] {
            assert_eq!(resolve_host(e), "localhost");
        }
        assert_eq!(
            to_web_request(&v1).unwrap().uri().to_string(),
            "https://localhost/test"
        );
    }

    #[test]
    fn test_host_resolution_order() {
        let v2 = event(json!({
            "rawPath": "/",
            "headers": { "host": "header.example.com" },
            "requestContext": { "domainName": "", "http": { "method": "GET" } }
        }));
        assert_eq!(resolve_host(&v2), "header.example.com");

        let alb = event(json!({
            "httpMethod": "GET",
            "path": "/",
            "headers": {},
            "multiValueHeaders": { "host": ["alb.example.com", "other"] },
            "requestContext": { "elb": {} }
        }));
        assert_eq!(resolve_host(&alb), "alb.example.com");

        let v1 = event(json!({
            "httpMethod": "GET",
            "path": "/",
            "headers": { "Host": "header.example.com" },
            "requestContext": { "domainName": "domain.example.com" }
        }));
        assert_eq!(resolve_host(&v1), "domain.example.com");

        let capitalized = event(json!({
            "httpMethod": "GET",
            "path": "/",
            "headers": { "Host": "header.example.com" }
        }));
        assert_eq!(resolve_host(&capitalized), "header.example.com");
    }

    #[test]
    fn test_v2_raw_query_and_cookies() {
        let request = to_web_request(&event(json!({
            "version": "2.0",
            "rawPath": "/profile",
            "rawQueryString": "q=test%20query&limit=10",
            "headers": { "host": "api.example.com", "cookie": "stale=1" },
            "cookies": ["session=abc123", "theme=dark"],
            "requestContext": { "domainName": "api.example.com", "http": { "method": "GET" } }
        })))
        .unwrap();

        assert_eq!(
            request.uri().to_string(),
            "https://api.example.com/profile?q=test%20query&limit=10"
        );
        assert_eq!(request.headers()["cookie"], "session=abc123; theme=dark");
    }

    #[test]
    fn test_v2_empty_cookie_list_leaves_header() {
        let request = to_web_request(&event(json!({
            "rawPath": "/",
            "headers": { "cookie": "kept=1" },
            "cookies": [],
            "requestContext": { "http": { "method": "GET" } }
        })))
        .unwrap();

        assert_eq!(request.headers()["cookie"], "kept=1");
    }

    #[test]
    fn test_alb_multi_value_headers() {
        let request = to_web_request(&event(json!({
            "httpMethod": "GET",
            "path": "/test",
            "headers": {},
            "multiValueHeaders": {
                "host": ["alb.example.com"],
                "x-forwarded-for": ["192.168.1.1", "10.0.0.1"],
                "accept": ["text/html", "application/json"]
            },
            "requestContext": { "elb": { "targetGroupArn": "arn:aws:elasticloadbalancing:tg" } }
        })))
        .unwrap();

        assert_eq!(request.uri().to_string(), "https://alb.example.com/test");
        assert_eq!(request.headers()["host"], "alb.example.com");
        assert_eq!(
            request.headers().joined("accept").as_deref(),
            Some("text/html, application/json")
        );
    }

    #[test]
    fn test_lowercase_method_is_normalized() {
        assert_eq!(parse_method("post").unwrap(), Method::POST);
        assert_eq!(parse_method("PATCH").unwrap(), Method::PATCH);
        assert!(matches!(
            parse_method("BAD METHOD"),
            Err(ConvertError::InvalidMethod(_))
        ));
    }

    #[tokio::test]
    async fn test_text_body() {
        let request = to_web_request(&event(json!({
            "httpMethod": "POST",
            "path": "/users",
            "body": "{\"name\": \"John Doe\"}",
            "isBase64Encoded": false,
            "requestContext": { "domainName": "api.example.com" }
        })))
        .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(body_text(request).await, "{\"name\": \"John Doe\"}");
    }

    #[tokio::test]
    async fn test_base64_body_is_decoded() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("binary data content");
        let request = to_web_request(&event(json!({
            "httpMethod": "POST",
            "path": "/upload",
            "body": encoded,
            "isBase64Encoded": true,
            "requestContext": { "domainName": "api.example.com" }
        })))
        .unwrap();

        assert_eq!(body_text(request).await, "binary data content");
    }

    #[tokio::test]
    async fn test_empty_body_is_no_body() {
        let request = to_web_request(&event(json!({
            "httpMethod": "GET",
            "path": "/",
            "body": "",
            "isBase64Encoded": true
        })))
        .unwrap();

        assert_eq!(body_text(request).await, "");
    }

    #[tokio::test]
    async fn test_wrapped_base64_body_is_decoded() {
        let request = to_web_request(&event(json!({
            "httpMethod": "POST",
            "path": "/upload",
            "body": "aGVsbG8g\r\nd29ybGQ= ",
            "isBase64Encoded": true
        })))
        .unwrap();

        assert_eq!(body_text(request).await, "hello world");
    }

    #[tokio::test]
    async fn test_url_safe_base64_body_is_decoded() {
        let request = to_web_request(&event(json!({
            "httpMethod": "POST",
            "path": "/upload",
            "body": "-_8=",
            "isBase64Encoded": true
        })))
        .unwrap();

        let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes.to_vec(), vec![0xfb_u8, 0xff]);
    }

    #[test]
    fn test_query_order_follows_event_json() {
        let event = TriggerEvent::from_json(
            r#"{
                "httpMethod": "GET",
                "path": "/search",
                "queryStringParameters": { "z": "1", "q": "test query", "a": "2" },
                "multiValueHeaders": { "x-b": ["1"], "x-a": ["2"] }
            }"#,
        )
        .unwrap();

        assert_eq!(build_query_string(&event), "z=1&q=test%20query&a=2");
        let headers = build_headers(&event).unwrap();
        let names: Vec<&str> = headers
            .keys()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, ["x-b", "x-a"]);
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        let result = to_web_request(&event(json!({
            "httpMethod": "POST",
            "path": "/",
            "body": "not base64!",
            "isBase64Encoded": true
        })));
        assert!(matches!(result, Err(ConvertError::InvalidBase64(_))));
    }
}
