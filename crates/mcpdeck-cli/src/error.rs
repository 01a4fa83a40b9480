//! CLI-specific error types and mappings.
//!
//! Maps controller and transport errors to exit codes and user-facing
//! messages.

use mcpdeck_core::ApiError;
use mcpdeck_gui::GuiError;
use mcpdeck_http::HttpError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The dashboard rejected or failed the request.
    #[error("{0}")]
    Api(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The current role may not perform this action.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The server or tool does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The dashboard could not be reached or timed out.
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Api(_) => 1,
            Self::Arguments(_) => 2,         // EX_USAGE
            Self::NotFound(_) => 66,         // EX_NOINPUT
            Self::Unavailable(_) => 69,      // EX_UNAVAILABLE
            Self::PermissionDenied(_) => 77, // EX_NOPERM
            Self::Config(_) => 78,           // EX_CONFIG
        }
    }
}

impl From<GuiError> for CliError {
    fn from(err: GuiError) -> Self {
        match err {
            GuiError::NotFound { entity, id } => Self::NotFound(format!("{entity} {id}")),
            GuiError::PermissionDenied(reason) => Self::PermissionDenied(reason),
            GuiError::ValidationFailed(msg) => Self::Arguments(msg),
            GuiError::Unavailable(msg) | GuiError::Timeout(msg) => Self::Unavailable(msg),
            GuiError::NotLoaded | GuiError::Conflict(_) | GuiError::Internal(_) => {
                Self::Api(err.to_string())
            }
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        GuiError::from(err).into()
    }
}

impl From<HttpError> for CliError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::InvalidUrl(_) | HttpError::UnusableBaseUrl(_) | HttpError::InvalidHeader(_) => {
                Self::Config(err.to_string())
            }
            HttpError::Network(_) | HttpError::JsonParse(_) => Self::Unavailable(err.to_string()),
        }
    }
}
