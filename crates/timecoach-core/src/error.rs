//! Core error types for timecoach-core.
//!
//! This module defines the error hierarchy using thiserror. The taxonomy
//! mirrors how a scheduling run can fail:
//!
//! - [`ConfigError`]: the planner configuration file is unreadable or
//!   unparseable. Individual malformed project/habit records are never
//!   fatal -- missing fields get defaults during deserialization.
//! - [`FetchError`]: an external snapshot source (busy times, task records)
//!   is unreachable or returned garbage. Fatal to a run, since no valid
//!   snapshot exists; transient variants may be retried via [`crate::retry`].
//! - [`ValidationError`]: an input value violates a data-model invariant.
//!
//! Capacity shortfalls are deliberately *not* errors: an item that fits no
//! slot becomes an unscheduled outcome and the run completes.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timecoach-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External snapshot source errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors from an external snapshot source (free/busy, tasks, config blob).
///
/// A run cannot proceed without its input snapshot, so these abort the run.
/// Only network-class failures qualify for retry.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure reaching the source
    #[error("Network error: {0}")]
    Network(String),

    /// The source did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// The source is throttling us
    #[error("Rate limited by source")]
    RateLimited,

    /// Credentials rejected; retrying cannot help
    #[error("Authorization rejected: {0}")]
    Unauthorized(String),

    /// The source answered with something we cannot use
    #[error("Invalid response from source: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Whether a retry with backoff is worthwhile.
    ///
    /// Authorization and malformed-response failures are permanent; retrying
    /// the same request would fail the same way.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Network(_) | FetchError::Timeout | FetchError::RateLimited
        )
    }
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
