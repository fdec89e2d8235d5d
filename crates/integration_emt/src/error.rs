//! Error types for the EMT client
//!
//! Every query operation returns [`QueryResult`]. Failures are a closed set of
//! [`ErrorKind`] values so consumers can match exhaustively and map each kind
//! to their own user-facing message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a query operation against the EMT API
pub type QueryResult<T> = Result<T, ErrorKind>;

/// Classified failure of a query operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Credential rejected by the API (HTTP 401)
    #[error("API token expired or rejected")]
    AuthExpired,

    /// Network failure, timeout, or unexpected HTTP status
    #[error("Transit service unreachable")]
    Unreachable,

    /// The queried stop or line has no data or does not exist
    #[error("No data found for the requested stop or line")]
    NotFound,

    /// Response did not match any known payload shape
    #[error("Unrecognized response format")]
    InvalidData,

    /// A listing came back empty where data is always expected
    #[error("No data returned by the transit service")]
    NoData,
}

impl ErrorKind {
    /// Stable snake_case identifier for this kind
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AuthExpired => "auth_expired",
            Self::Unreachable => "unreachable",
            Self::NotFound => "not_found",
            Self::InvalidData => "invalid_data",
            Self::NoData => "no_data",
        }
    }

    /// Returns true if repeating the same request may succeed
    ///
    /// The client itself never retries; this is a hint for callers.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

/// Errors raised while building a client
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Configuration values failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The base URL cannot be used to build endpoint paths
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The configured URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The underlying HTTP client could not be initialized
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),
}
