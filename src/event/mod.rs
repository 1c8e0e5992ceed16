//! Trigger event subsystem.
//!
//! # Data Flow
//! ```text
//! raw JSON payload
//!     → classify() (structural probe, no type tag)
//!     → TriggerEvent (typed variant)
//!     → http::request (canonical request)
//! ```
//!
//! # Design Decisions
//! - `rawPath` is the only unambiguous marker, so it is probed first
//! - ALB and v1 share a shape; `requestContext.elb` decides between them
//! - Anything else falls through to v1 instead of failing

pub mod types;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ConvertError, ConvertResult};

pub use types::{
    AlbEvent, AlbRequestContext, AlbTargetGroup, ApiGatewayV1Event, ApiGatewayV1RequestContext,
    ApiGatewayV2Event, ApiGatewayV2Http, ApiGatewayV2RequestContext, MultiValueMap,
    SingleValueMap,
};

/// The three trigger shapes the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    GatewayV1,
    GatewayV2,
    LoadBalancer,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::GatewayV1 => write!(f, "API Gateway v1"),
            EventKind::GatewayV2 => write!(f, "API Gateway v2"),
            EventKind::LoadBalancer => write!(f, "ALB"),
        }
    }
}

/// Classify a raw event by probing its structure.
///
/// Never fails: a payload that matches nothing is treated as v1.
pub fn classify(value: &Value) -> EventKind {
    if value.get("rawPath").is_some() {
        return EventKind::GatewayV2;
    }

    let has_elb = value
        .get("requestContext")
        .and_then(|ctx| ctx.get("elb"))
        .is_some();
    if has_elb {
        EventKind::LoadBalancer
    } else {
        EventKind::GatewayV1
    }
}

/// A classified HTTP trigger event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TriggerEvent {
    GatewayV1(ApiGatewayV1Event),
    GatewayV2(ApiGatewayV2Event),
    LoadBalancer(AlbEvent),
}

impl TriggerEvent {
    /// Classify and deserialize a raw JSON event.
    pub fn from_value(value: Value) -> ConvertResult<Self> {
        let kind = classify(&value);
        let malformed = |source: serde_json::Error| ConvertError::MalformedEvent { kind, source };

        let event = match kind {
            EventKind::GatewayV2 => {
                TriggerEvent::GatewayV2(serde_json::from_value(value).map_err(malformed)?)
            }
            EventKind::LoadBalancer => {
                TriggerEvent::LoadBalancer(serde_json::from_value(value).map_err(malformed)?)
            }
            EventKind::GatewayV1 => {
                TriggerEvent::GatewayV1(serde_json::from_value(value).map_err(malformed)?)
            }
        };
        Ok(event)
    }

    /// Parse and classify an event from JSON text.
    pub fn from_json(json: &str) -> ConvertResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|source| {
            ConvertError::MalformedEvent {
                kind: EventKind::GatewayV1,
                source,
            }
        })?;
        Self::from_value(value)
    }

    pub fn kind(&self) -> EventKind {
        match self {
            TriggerEvent::GatewayV1(_) => EventKind::GatewayV1,
            TriggerEvent::GatewayV2(_) => EventKind::GatewayV2,
            TriggerEvent::LoadBalancer(_) => EventKind::LoadBalancer,
        }
    }

    /// HTTP method as carried by the event.
    pub fn method(&self) -> &str {
        match self {
            TriggerEvent::GatewayV1(e) => &e.http_method,
            TriggerEvent::GatewayV2(e) => &e.request_context.http.method,
            TriggerEvent::LoadBalancer(e) => &e.http_method,
        }
    }

    /// Request path, verbatim (`rawPath` for v2).
    pub fn path(&self) -> &str {
        match self {
            TriggerEvent::GatewayV1(e) => &e.path,
            TriggerEvent::GatewayV2(e) => &e.raw_path,
            TriggerEvent::LoadBalancer(e) => &e.path,
        }
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        let path = path.into();
        match self {
            TriggerEvent::GatewayV1(e) => e.path = path,
            TriggerEvent::GatewayV2(e) => e.raw_path = path,
            TriggerEvent::LoadBalancer(e) => e.path = path,
        }
    }

    /// Raw body and its base64 flag.
    pub fn body(&self) -> (Option<&str>, bool) {
        let (body, encoded) = match self {
            TriggerEvent::GatewayV1(e) => (&e.body, e.is_base64_encoded),
            TriggerEvent::GatewayV2(e) => (&e.body, e.is_base64_encoded),
            TriggerEvent::LoadBalancer(e) => (&e.body, e.is_base64_encoded),
        };
        (body.as_deref(), encoded.unwrap_or(false))
    }
}

impl From<ApiGatewayV1Event> for TriggerEvent {
    fn from(event: ApiGatewayV1Event) -> Self {
        TriggerEvent::GatewayV1(event)
    }
}

impl From<ApiGatewayV2Event> for TriggerEvent {
    fn from(event: ApiGatewayV2Event) -> Self {
        TriggerEvent::GatewayV2(event)
    }
}

impl From<AlbEvent> for TriggerEvent {
    fn from(event: AlbEvent) -> Self {
        TriggerEvent::LoadBalancer(event)
    }
}

impl<'de> Deserialize<'de> for TriggerEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        TriggerEvent::from_value(value).map_err(serde::de::Error::custom)
    }
}
