//! Keeper configuration.
//!
//! Controls how resource names are turned into handler names and whether
//! resolved names must be present in the handler catalog. Configuration is
//! loaded from environment variables with defaults matching the conventional
//! `FooController` naming scheme.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for a [`Keeper`](crate::Keeper).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperConfig {
    /// Suffix appended to derived resource names (e.g. `Controller`).
    pub handler_suffix: String,

    /// Whether resolved names must belong to a registered handler.
    ///
    /// Hosts without a handler catalog can disable this, in which case any
    /// well-formed derived name is accepted as a resource identifier.
    pub validate_handlers: bool,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            handler_suffix: "Controller".to_string(),
            validate_handlers: true,
        }
    }
}

impl KeeperConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACCESS_HANDLER_SUFFIX`: Suffix for derived handler names (default: Controller)
    /// - `ACCESS_VALIDATE_HANDLERS`: Require catalog membership (default: true)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            handler_suffix: std::env::var("ACCESS_HANDLER_SUFFIX")
                .unwrap_or(default.handler_suffix),
            validate_handlers: std::env::var("ACCESS_VALIDATE_HANDLERS")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.validate_handlers),
        }
    }

    /// Validate the configuration.
    ///
    /// The suffix must be a single capitalized identifier word so that
    /// derived names stay valid qualified type names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let suffix = &self.handler_suffix;
        if suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_HANDLER_SUFFIX".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !suffix.starts_with(|c: char| c.is_ascii_uppercase())
            || !suffix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_HANDLER_SUFFIX".to_string(),
                message: format!("{suffix:?} is not a capitalized identifier"),
            });
        }
        Ok(())
    }
}
