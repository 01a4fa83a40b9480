//! Backend error taxonomy.
//!
//! Adapters map their transport errors into `ApiError` at the port
//! boundary so the controller never sees HTTP client types.

use thiserror::Error;

use crate::domain::ServerDetail;

/// Errors returned by backend ports.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The requested resource does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Type of entity (e.g., "server", "project").
        entity: &'static str,
        /// Identifier that was not found.
        id: String,
    },

    /// The request could not complete (connection refused, DNS, reset...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend's health probe exceeded its budget (HTTP 408).
    #[error("health check timed out")]
    Timeout {
        /// Partial server data carried by the error body, if any.
        partial: Option<Box<ServerDetail>>,
    },

    /// The backend rejected the request's content.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Any other non-success HTTP status.
    #[error("backend returned {status}: {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the body, or the status reason.
        message: String,
    },

    /// The backend answered with a body this client could not understand.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Coarse classification used for notifications and retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NetworkFailure,
    RemoteTimeout,
    RemoteError,
    ValidationFailure,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Network(_) => ErrorKind::NetworkFailure,
            Self::Timeout { .. } => ErrorKind::RemoteTimeout,
            Self::Validation(_) => ErrorKind::ValidationFailure,
            Self::Remote { .. } | Self::InvalidResponse(_) => ErrorKind::RemoteError,
        }
    }

    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
