//! Invocation wrapper around an application service.
//!
//! Runs event → request → application → response → result, and replaces
//! any failure along the way with a fixed 500 result.

use axum::body::Body;
use axum::http::{Request, Response};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tower::{BoxError, Service, ServiceExt};

use crate::config::BridgeConfig;
use crate::error::ConvertError;
use crate::event::TriggerEvent;
use crate::http::{to_trigger_result, to_web_request, ResponseConversionOptions, TriggerResult};
use crate::util::sanitize_path;

/// Body of the fallback result. Never carries error details.
pub const FALLBACK_BODY: &str = r#"{"error":"Internal Server Error"}"#;

/// Options applied by [`LambdaHandler`] on every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerOptions {
    /// Passed verbatim to the response converter.
    pub conversion: ResponseConversionOptions,

    /// Run the event path through `sanitize_path` before building the request.
    pub sanitize_path: bool,
}

impl From<&BridgeConfig> for HandlerOptions {
    fn from(config: &BridgeConfig) -> Self {
        Self {
            conversion: config.conversion.clone(),
            sanitize_path: config.handler.sanitize_path,
        }
    }
}

/// Errors that trigger the fallback result.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("application error: {0}")]
    Application(#[source] BoxError),
}

/// Wraps an application so it can serve trigger events.
#[derive(Debug, Clone)]
pub struct LambdaHandler<S> {
    service: S,
    options: HandlerOptions,
}

impl<S> LambdaHandler<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone,
    S::Error: Into<BoxError>,
{
    pub fn new(service: S) -> Self {
        Self::with_options(service, HandlerOptions::default())
    }

    pub fn with_options(service: S, options: HandlerOptions) -> Self {
        Self { service, options }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// Handle a raw JSON event. Classification failures also fall back.
    pub async fn handle_value(&self, value: Value) -> TriggerResult {
        match TriggerEvent::from_value(value) {
            Ok(event) => self.handle(event).await,
            Err(err) => {
                tracing::error!(error = %err, "Rejected trigger event");
                fallback_result()
            }
        }
    }

    /// Handle a classified event, never failing.
    pub async fn handle(&self, event: TriggerEvent) -> TriggerResult {
        let kind = event.kind();
        match self.try_handle(event).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(kind = %kind, error = %err, "Invocation failed");
                fallback_result()
            }
        }
    }

    /// Handle a classified event, surfacing the failure instead of
    /// substituting the fallback.
    pub async fn try_handle(&self, mut event: TriggerEvent) -> Result<TriggerResult, InvokeError> {
        if self.options.sanitize_path {
            let path = sanitize_path(event.path());
            event.set_path(path);
        }

        let request = to_web_request(&event)?;
        let response = self
            .service
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| InvokeError::Application(e.into()))?;

        Ok(to_trigger_result(response, &self.options.conversion).await?)
    }
}

/// The fixed result returned when an invocation fails.
pub fn fallback_result() -> TriggerResult {
    TriggerResult {
        status_code: 500,
        body: FALLBACK_BODY.to_string(),
        is_base64_encoded: false,
        headers: Some(IndexMap::from([(
            "content-type".to_string(),
            "application/json".to_string(),
        )])),
        multi_value_headers: None,
    }
}
