//! Fetch Error Taxonomy
//!
//! Every failed fetch or mutation is reported as one uniform descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Common result type for remote collection operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Transport failure or timeout, no response received
    Network,
    /// Non-2xx response outside 4xx, or a body that could not be parsed
    Server,
    /// 4xx response: the request itself was rejected
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Server => write!(f, "server error"),
            ErrorKind::Validation => write!(f, "validation error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Classify a non-2xx HTTP status. 4xx means the caller's input was
    /// rejected; anything else is the server's problem.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let kind = if (400..500).contains(&status) {
            ErrorKind::Validation
        } else {
            ErrorKind::Server
        };
        Self::new(kind, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(FetchError::from_status(400, "bad filter").kind, ErrorKind::Validation);
        assert_eq!(FetchError::from_status(422, "bad payload").kind, ErrorKind::Validation);
        assert_eq!(FetchError::from_status(499, "closed").kind, ErrorKind::Validation);
        assert_eq!(FetchError::from_status(500, "boom").kind, ErrorKind::Server);
        assert_eq!(FetchError::from_status(503, "busy").kind, ErrorKind::Server);
        assert_eq!(FetchError::from_status(302, "moved").kind, ErrorKind::Server);
    }

    #[test]
    fn test_display() {
        let err = FetchError::network("connection refused");
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
