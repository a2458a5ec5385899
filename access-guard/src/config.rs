//! Guard configuration.
//!
//! Controls what a rejected request is told, which role stands in for a
//! principal without clearance, and how handlers that never declared rules
//! are treated.

use access_keeper::{ConfigError, Role};
use serde::{Deserialize, Serialize};

/// Configuration for a [`Guard`](crate::Guard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where rejected requests are sent.
    pub redirect_location: String,

    /// Message attached to a rejection.
    pub denial_message: String,

    /// Role assumed when a request yields no clearance levels.
    pub guest_role: String,

    /// Treat every handler as locked, even without declared rules.
    pub lock_by_default: bool,

    /// Consult the singular `clearance_level` accessor when the plural one
    /// yields nothing.
    pub legacy_role_accessor: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            redirect_location: "/".to_string(),
            denial_message: "Not authorized.".to_string(),
            guest_role: Role::GUEST.to_string(),
            lock_by_default: false,
            legacy_role_accessor: true,
        }
    }
}

impl GuardConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACCESS_REDIRECT_LOCATION`: Rejection redirect target (default: /)
    /// - `ACCESS_DENIAL_MESSAGE`: Rejection message (default: Not authorized.)
    /// - `ACCESS_GUEST_ROLE`: Role for requests without clearance (default: guest)
    /// - `ACCESS_LOCK_BY_DEFAULT`: Lock every handler (default: false)
    /// - `ACCESS_LEGACY_ROLE_ACCESSOR`: Honor the singular accessor (default: true)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            redirect_location: std::env::var("ACCESS_REDIRECT_LOCATION")
                .unwrap_or(default.redirect_location),
            denial_message: std::env::var("ACCESS_DENIAL_MESSAGE")
                .unwrap_or(default.denial_message),
            guest_role: std::env::var("ACCESS_GUEST_ROLE").unwrap_or(default.guest_role),
            lock_by_default: std::env::var("ACCESS_LOCK_BY_DEFAULT")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(default.lock_by_default),
            legacy_role_accessor: std::env::var("ACCESS_LEGACY_ROLE_ACCESSOR")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.legacy_role_accessor),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redirect_location.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_REDIRECT_LOCATION".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if Role::parse(&self.guest_role).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_GUEST_ROLE".to_string(),
                message: format!("{:?} is not a valid role name", self.guest_role),
            });
        }

        Ok(())
    }
}
