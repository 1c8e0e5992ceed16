//! Invocation wrapper subsystem.
//!
//! # Data Flow
//! ```text
//! raw event (JSON)
//!     → lambda.rs (classify, build request)
//!     → application service (any tower Service, e.g. axum::Router)
//!     → lambda.rs (build result, or the fixed 500 fallback)
//! ```
//!
//! # Design Decisions
//! - The converters never recover from errors; only this layer does
//! - The fallback body is constant so error details never leak
//! - `echo.rs` is a stand-in application for the command-line tool

pub mod echo;
pub mod lambda;

pub use echo::echo_app;
pub use lambda::{fallback_result, HandlerOptions, InvokeError, LambdaHandler, FALLBACK_BODY};
