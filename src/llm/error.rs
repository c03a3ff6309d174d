//! Backend errors
//!
//! [`BackendError`] describes what went wrong inside a backend.
//! [`UnsuccessfulRequest`] is the single error callers of
//! [`LLMClient::query`](super::LLMClient::query) see.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during backend operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BackendError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Authentication failed or credentials are invalid
    AuthenticationError { message: String },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// Invalid or malformed response from the LLM
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    /// Configuration error (missing API keys, invalid settings, etc.)
    ConfigurationError { message: String },

    /// Network-related error
    NetworkError { message: String },

    /// No backend is registered under the requested name
    UnknownBackend { name: String },

    /// Generic error for other cases
    Other { message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::AuthenticationError { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::InvalidResponse { message, .. } => {
                write!(f, "Invalid response from LLM: {}", message)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            BackendError::UnknownBackend { name } => {
                write!(
                    f,
                    "Backend with name '{}' not found. Valid options: {}",
                    name,
                    super::backend_names().join(", ")
                )
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}

/// A backend call that failed for any reason
#[derive(Debug, Clone, Error)]
#[error("Unsuccessful request to {backend}: {source}")]
pub struct UnsuccessfulRequest {
    backend: String,
    #[source]
    source: BackendError,
}

impl UnsuccessfulRequest {
    pub fn new(backend: impl Into<String>, source: BackendError) -> Self {
        Self {
            backend: backend.into(),
            source,
        }
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// The failure reported by the backend
    pub fn cause(&self) -> &BackendError {
        &self.source
    }
}
