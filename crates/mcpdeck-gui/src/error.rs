//! Semantic error types for controller operations.
//!
//! These errors are domain-focused, not HTTP-focused. Presentation
//! adapters map `GuiError` to whatever they show (tooltip, toast, exit code).

use std::fmt;

use mcpdeck_core::ApiError;

/// Semantic errors for controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiError {
    /// Entity not found (404-ish).
    NotFound {
        /// Type of entity (e.g., "server", "tool").
        entity: &'static str,
        /// Identifier that was not found.
        id: String,
    },

    /// The edit capability was not granted. Carries the reason to show.
    PermissionDenied(String),

    /// An action was requested before any server record was published.
    NotLoaded,

    /// Request validation failed (400-ish).
    ValidationFailed(String),

    /// Operation conflicts with current state (409-ish), e.g. a bulk
    /// preference update is already running for the server.
    Conflict(String),

    /// Backend temporarily unreachable or failing (503-ish).
    Unavailable(String),

    /// The backend's health probe timed out.
    Timeout(String),

    /// Unexpected internal error.
    Internal(String),
}

impl fmt::Display for GuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::PermissionDenied(reason) => write!(f, "permission denied: {reason}"),
            Self::NotLoaded => f.write_str("server has not been loaded yet"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::Conflict(msg) => write!(f, "conflict: {msg}"),
            Self::Unavailable(msg) => write!(f, "service unavailable: {msg}"),
            Self::Timeout(msg) => write!(f, "timed out: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for GuiError {}

// ============================================================================
// Conversions from core errors
// ============================================================================

impl From<ApiError> for GuiError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound { entity, id } => Self::NotFound { entity, id },
            ApiError::Network(msg) => Self::Unavailable(msg),
            ApiError::Timeout { .. } => Self::Timeout("health check timed out".to_string()),
            ApiError::Validation(msg) => Self::ValidationFailed(msg),
            ApiError::Remote { status, message } if status >= 500 => {
                Self::Unavailable(format!("backend returned {status}: {message}"))
            }
            ApiError::Remote { status, message } => {
                Self::Internal(format!("backend returned {status}: {message}"))
            }
            ApiError::InvalidResponse(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_mapping() {
        assert_eq!(
            GuiError::from(ApiError::Validation("unknown tool".into())),
            GuiError::ValidationFailed("unknown tool".into())
        );
        assert!(matches!(
            GuiError::from(ApiError::remote(502, "bad gateway")),
            GuiError::Unavailable(_)
        ));
        assert!(matches!(
            GuiError::from(ApiError::remote(409, "locked")),
            GuiError::Internal(_)
        ));
        assert!(matches!(
            GuiError::from(ApiError::Timeout { partial: None }),
            GuiError::Timeout(_)
        ));
    }

    #[test]
    fn test_display() {
        let err = GuiError::PermissionDenied("Viewers cannot modify servers".into());
        assert_eq!(err.to_string(), "permission denied: Viewers cannot modify servers");
        assert_eq!(GuiError::NotLoaded.to_string(), "server has not been loaded yet");
    }
}
