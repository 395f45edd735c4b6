//! Error types for Gourmet
//!
//! This module defines the error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Gourmet operations
///
/// Gateway failures are split into transport, status, and decode variants
/// so they can be logged precisely. Callers that present errors to the user
/// collapse all three into a single flat message (see
/// [`GourmetError::is_gateway_failure`]).
#[derive(Error, Debug)]
pub enum GourmetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced a response (connect, timeout, TLS)
    #[error("Request to {endpoint} failed: {message}")]
    Transport {
        /// Endpoint path the request was sent to
        endpoint: String,
        /// Underlying transport error text
        message: String,
    },

    /// The service answered with a non-2xx status
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint path the request was sent to
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode {
        /// Endpoint path the request was sent to
        endpoint: String,
        /// Parser error text
        message: String,
    },

    /// User-supplied value was rejected before reaching the service
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GourmetError {
    /// Returns true for failures that originate in the remote data gateway
    ///
    /// # Examples
    ///
    /// ```
    /// use gourmet::error::GourmetError;
    ///
    /// let err = GourmetError::Status { endpoint: "/stats".into(), status: 500 };
    /// assert!(err.is_gateway_failure());
    /// assert!(!GourmetError::Config("bad".into()).is_gateway_failure());
    /// ```
    pub fn is_gateway_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Decode { .. }
        )
    }
}

/// Result type alias for Gourmet operations
///
/// Uses `anyhow::Error` so call sites can attach context while still
/// carrying a [`GourmetError`] that can be downcast when needed.
pub type Result<T> = anyhow::Result<T>;
