//! Shared event fixtures for integration tests.

use serde_json::{json, Value};

/// API Gateway v1 GET with single-value query parameters.
pub fn v1_get_event() -> Value {
    json!({
        "resource": "/users",
        "path": "/users",
        "httpMethod": "GET",
        "headers": {
            "Host": "api.example.com",
            "Accept": "application/json"
        },
        "multiValueHeaders": null,
        "queryStringParameters": { "q": "test query", "limit": "10" },
        "multiValueQueryStringParameters": null,
        "body": null,
        "isBase64Encoded": false,
        "requestContext": {
            "domainName": "api.example.com",
            "stage": "prod",
            "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef"
        }
    })
}

/// API Gateway v1 POST carrying a JSON body.
pub fn v1_post_event() -> Value {
    json!({
        "path": "/users",
        "httpMethod": "POST",
        "headers": {
            "content-type": "application/json",
            "x-forwarded-for": "192.168.1.1"
        },
        "multiValueHeaders": {
            "x-forwarded-for": ["192.168.1.1", "10.0.0.1"]
        },
        "body": "{\"name\":\"John\"}",
        "isBase64Encoded": false,
        "requestContext": { "domainName": "api.example.com" }
    })
}

/// API Gateway v2 event with cookies and a compound raw query string.
pub fn v2_event() -> Value {
    json!({
        "version": "2.0",
        "routeKey": "$default",
        "rawPath": "/search",
        "rawQueryString": "q=rust%20lang&tags=a&tags=b&empty=",
        "cookies": ["session=abc123", "theme=dark"],
        "headers": {
            "host": "abc123.execute-api.us-east-1.amazonaws.com",
            "user-agent": "curl/8.0"
        },
        "body": "aGVsbG8=",
        "isBase64Encoded": true,
        "requestContext": {
            "domainName": "abc123.execute-api.us-east-1.amazonaws.com",
            "http": { "method": "PUT", "path": "/search", "sourceIp": "203.0.113.7" },
            "requestId": "JKJaXmPLvHcESHA="
        }
    })
}

/// ALB event with multi-value headers and query parameters.
pub fn alb_event() -> Value {
    json!({
        "httpMethod": "GET",
        "path": "/items",
        "multiValueQueryStringParameters": { "tags": ["a", "b"], "sort": ["name asc"] },
        "multiValueHeaders": {
            "host": ["lb.example.com"],
            "accept": ["text/html", "application/json"]
        },
        "body": "",
        "isBase64Encoded": false,
        "requestContext": {
            "elb": {
                "targetGroupArn": "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/lb/50dc6c495c0c9188"
            }
        }
    })
}
