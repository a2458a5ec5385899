//! Error types for access rule registration and lookup
//!
//! Only structural and configuration problems are errors. An unauthorized
//! query is never an error; it answers `false`.

use thiserror::Error;

use crate::config::ConfigError;

/// Access keeper error types.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No handler is registered under the resolved name
    #[error("Unknown resource: no handler named {name}")]
    UnknownResource {
        /// The fully qualified handler name that failed to resolve.
        name: String,
    },

    /// Role value could not be normalized
    #[error("Malformed role: {0:?}")]
    MalformedRole(String),

    /// Action value could not be normalized
    #[error("Malformed action: {0:?}")]
    MalformedAction(String),

    /// Resource name could not be turned into a handler name
    #[error("Malformed resource name: {0:?}")]
    MalformedResource(String),

    /// Namespace path contains invalid segments
    #[error("Malformed namespace: {0:?}")]
    MalformedNamespace(String),

    /// Handler registration with a name that is not a qualified type name
    #[error("Invalid handler name: {0:?}")]
    InvalidHandlerName(String),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for access keeper operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Check if this error comes from configuration rather than a call site.
    pub fn is_config_error(&self) -> bool {
        matches!(self, AccessError::Config(_))
    }

    /// Check if this error was caused by caller input that failed normalization.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            AccessError::MalformedRole(_)
                | AccessError::MalformedAction(_)
                | AccessError::MalformedResource(_)
                | AccessError::MalformedNamespace(_)
        )
    }

    /// Get error code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::UnknownResource { .. } => "UNKNOWN_RESOURCE",
            AccessError::MalformedRole(_) => "MALFORMED_ROLE",
            AccessError::MalformedAction(_) => "MALFORMED_ACTION",
            AccessError::MalformedResource(_) => "MALFORMED_RESOURCE",
            AccessError::MalformedNamespace(_) => "MALFORMED_NAMESPACE",
            AccessError::InvalidHandlerName(_) => "INVALID_HANDLER_NAME",
            AccessError::Config(_) => "CONFIG_ERROR",
        }
    }
}
