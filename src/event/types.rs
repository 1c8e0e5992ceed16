//! Wire shapes of the three HTTP trigger events.
//!
//! Only the fields the converter reads are modelled; everything else in the
//! payload is ignored on deserialization. Every nullable field is an
//! `Option`, so `null` and an absent key mean the same thing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Single-value header or query map. Values may be `null`.
pub type SingleValueMap = IndexMap<String, Option<String>>;

/// Multi-value header or query map. Lists may be `null`.
pub type MultiValueMap = IndexMap<String, Option<Vec<String>>>;

/// REST API (API Gateway v1) proxy event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV1Event {
    pub http_method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default)]
    pub headers: Option<SingleValueMap>,
    #[serde(default)]
    pub multi_value_headers: Option<MultiValueMap>,
    #[serde(default)]
    pub query_string_parameters: Option<SingleValueMap>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<MultiValueMap>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
    #[serde(default)]
    pub request_context: Option<ApiGatewayV1RequestContext>,
}

/// Request context of a v1 event. Only the domain name is used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV1RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// HTTP API (API Gateway v2) event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV2Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_key: Option<String>,
    pub raw_path: String,
    #[serde(default)]
    pub raw_query_string: Option<String>,
    #[serde(default)]
    pub headers: Option<SingleValueMap>,
    #[serde(default)]
    pub cookies: Option<Vec<String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
    pub request_context: ApiGatewayV2RequestContext,
}

/// Request context of a v2 event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV2RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    pub http: ApiGatewayV2Http,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// The `requestContext.http` block of a v2 event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV2Http {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,
}

/// Application Load Balancer target event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: Option<SingleValueMap>,
    #[serde(default)]
    pub multi_value_headers: Option<MultiValueMap>,
    #[serde(default)]
    pub query_string_parameters: Option<SingleValueMap>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<MultiValueMap>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
    pub request_context: AlbRequestContext,
}

/// Request context of an ALB event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbRequestContext {
    pub elb: AlbTargetGroup,
}

/// The `requestContext.elb` marker block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbTargetGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_group_arn: Option<String>,
}
