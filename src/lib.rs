//! Lambda HTTP Bridge Library
//!
//! Translates Lambda HTTP trigger events (API Gateway v1, API Gateway v2,
//! ALB) into canonical `http::Request`s and canonical responses back into
//! trigger results.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod http;
pub mod observability;
pub mod util;

pub use config::BridgeConfig;
pub use error::{ConvertError, ConvertResult};
pub use event::{classify, EventKind, TriggerEvent};
pub use handler::{echo_app, HandlerOptions, LambdaHandler};
pub use http::{to_trigger_result, to_web_request, ResponseConversionOptions, TriggerResult};
pub use util::{is_valid_http_method, normalize_headers, parse_multi_value_headers, sanitize_path};
