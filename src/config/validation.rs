//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check media-type patterns are usable
//! - Validate value ranges (body limit > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::BridgeConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("binary_media_types[{index}] is empty")]
    EmptyMediaType { index: usize },

    #[error("binary_media_types[{index}] {pattern:?} is not a type/subtype pattern")]
    MalformedMediaType { index: usize, pattern: String },

    #[error("body_limit must be greater than zero")]
    ZeroBodyLimit,

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, pattern) in config.conversion.binary_media_types.iter().enumerate() {
        if pattern.trim().is_empty() {
            errors.push(ValidationError::EmptyMediaType { index });
        } else if !pattern.contains('/') {
            errors.push(ValidationError::MalformedMediaType {
                index,
                pattern: pattern.clone(),
            });
        }
    }

    if config.conversion.body_limit == Some(0) {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
