//! HTTP conversion subsystem.
//!
//! # Data Flow
//! ```text
//! TriggerEvent
//!     → request.rs (host, path, query, headers, body)
//!     → Request<Body> (handed to the application)
//!     → Response<Body> (returned by the application)
//!     → response.rs (binary.rs decision, cookie lift, header maps)
//!     → TriggerResult
//! ```
//!
//! Both directions read and write headers through `headers::HeaderCollection`.

pub mod binary;
pub mod headers;
pub mod request;
pub mod response;

pub use binary::is_binary_response;
pub use headers::HeaderCollection;
pub use request::to_web_request;
pub use response::{
    encode_response, to_trigger_result, ResponseConversionOptions, TriggerResult, SET_COOKIE_KEY,
};
