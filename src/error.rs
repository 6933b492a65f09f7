//! Configuration error types
//!
//! The simulation itself never fails; only loading a destruction profile can.

use thiserror::Error;

/// Errors produced while loading or validating a [`crate::DestructionConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid destruction profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A `min_*`/`max_*` pair is inverted.
    #[error("invalid range for {field}: min {min} > max {max}")]
    InvalidRange {
        /// Name of the offending range.
        field: &'static str,
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },

    /// A value that must be strictly positive is not.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: f32,
    },

    /// Coast drag outside `(0, 1]`.
    #[error("coast drag must be in (0, 1], got {0}")]
    InvalidDrag(f32),
}
