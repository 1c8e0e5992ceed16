//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! event conversion / invocation
//!     → tracing events (debug: conversions, warn: fallbacks)
//!     → logging.rs subscriber (pretty or JSON, stderr)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; installing a subscriber is the binary's job
//! - Output goes to stderr so stdout stays machine-readable

pub mod logging;

pub use logging::init_logging;
