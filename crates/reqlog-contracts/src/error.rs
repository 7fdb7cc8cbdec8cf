//! Error types for the reqlog crates.
//!
//! Data problems inside the logging pipeline never surface as errors: they
//! degrade to sentinels or empty values. `ReqlogError` covers the few places
//! that can genuinely fail: loading configuration and writing to a sink.

use thiserror::Error;

/// The unified error type for the reqlog crates.
#[derive(Debug, Error)]
pub enum ReqlogError {
    /// A configuration document is missing, unreadable or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A log sink could not accept a record.
    #[error("log sink write failed: {reason}")]
    SinkWriteFailed { reason: String },

    /// A record could not be rendered to its wire form.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

/// Convenience alias used throughout the reqlog crates.
pub type ReqlogResult<T> = Result<T, ReqlogError>;
