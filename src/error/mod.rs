//! Error types for Tycho.

use thiserror::Error;

/// Primary error type for all Tycho operations.
#[derive(Error, Debug)]
pub enum TychoError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A classified HTTP error response from the service. Never retried.
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
        code: Option<String>,
        param: Option<String>,
    },

    /// A transport-level failure on a single attempt (connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service was never reached: every transport attempt failed.
    #[error("Service unreachable after {attempts} attempts: {}", .attempt_errors.join("; "))]
    Unreachable {
        attempts: u32,
        /// One entry per failed attempt, in order.
        attempt_errors: Vec<String>,
    },

    /// A 2xx response whose body did not decode into the expected shape.
    #[error("Malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    InvalidArgument,
    Api,
    Network,
    Unreachable,
    Decode,
    Serialization,
    Timeout,
    Io,
}

impl TychoError {
    /// Create an API error from a status code and message, without the
    /// optional provider fields.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            error_type: None,
            code: None,
            param: None,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::InvalidArgument(_) => ErrorCategory::InvalidArgument,
            Self::Api { .. } => ErrorCategory::Api,
            Self::Network(_) => ErrorCategory::Network,
            Self::Unreachable { .. } => ErrorCategory::Unreachable,
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Whether another transport attempt may succeed. Classified HTTP
    /// responses are deterministic rejections and are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network)
    }

    /// The HTTP status code, when this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TychoError>;
