//! # Guard
//!
//! Decides whether a request may reach its handler.
//!
//! ## Check order
//!
//! ```text
//! check(request)
//!   1. handler unlocked and lock_by_default off  => Proceed
//!   2. roles = clearance_levels()
//!           | clearance_level()   (legacy, warns once)
//!           | guest role
//!   3. keeper.is_allowed(roles, action, handler) => Proceed | Reject
//! ```
//!
//! A rejection carries where to send the principal and what to tell it.
//! Handlers can build the same rejection themselves with [`Guard::reject`]
//! for finer control inside an action.

use access_keeper::{AccessResult, Clearances, Keeper, ResourceRef};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::GuardConfig;
use crate::request::AccessRequest;

/// Set once the singular role accessor has been reported.
static LEGACY_ACCESSOR_WARNED: AtomicBool = AtomicBool::new(false);

/// Where a rejected request is sent, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Redirect target.
    pub location: String,
    /// Message shown to the principal.
    pub message: String,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict")]
pub enum Verdict {
    /// Let the request through.
    Proceed,
    /// Stop the request.
    Reject(Rejection),
}

impl Verdict {
    /// Check if the request may proceed.
    pub fn is_proceed(&self) -> bool {
        matches!(self, Verdict::Proceed)
    }

    /// Get the rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Proceed => None,
            Verdict::Reject(rejection) => Some(rejection),
        }
    }
}

/// Overrides for a rejection built with [`Guard::reject`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectOptions {
    /// Message to use instead of the configured one.
    pub message: Option<String>,
    /// Location to use instead of the configured one.
    pub location: Option<String>,
}

impl RejectOptions {
    /// Override the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Request guard backed by a [`Keeper`].
///
/// # Example
///
/// ```
/// use access_guard::{AccessRequest, Guard, GuardConfig};
/// use access_keeper::{Clearances, Keeper, KeeperConfig};
///
/// struct Request(&'static str);
///
/// impl AccessRequest for Request {
///     fn clearance_levels(&self) -> Option<Clearances> {
///         Some(Clearances::from(self.0))
///     }
///     fn action_name(&self) -> &str {
///         "edit"
///     }
///     fn handler_name(&self) -> &str {
///         "ArticlesController"
///     }
/// }
///
/// let keeper = Keeper::new(KeeperConfig::default()).unwrap();
/// keeper.register_handler("ArticlesController").unwrap();
/// keeper.lock("articles", None).unwrap();
/// keeper.grant("editors", "edit", "articles", None).unwrap();
///
/// let guard = Guard::new(&keeper, GuardConfig::default()).unwrap();
/// assert!(guard.check(&Request("editor")).unwrap().is_proceed());
/// assert!(!guard.check(&Request("user")).unwrap().is_proceed());
/// ```
#[derive(Debug)]
pub struct Guard<'k> {
    keeper: &'k Keeper,
    config: GuardConfig,
}

impl<'k> Guard<'k> {
    /// Create a guard over `keeper`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Config`](access_keeper::AccessError::Config) if
    /// the configuration is invalid.
    pub fn new(keeper: &'k Keeper, config: GuardConfig) -> AccessResult<Self> {
        config.validate()?;
        Ok(Self { keeper, config })
    }

    /// Get the guard configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Get the keeper consulted by this guard.
    pub fn keeper(&self) -> &'k Keeper {
        self.keeper
    }

    /// Decide whether `request` may reach its handler.
    ///
    /// # Errors
    ///
    /// Fails if the handler is unknown or the request's roles or action
    /// cannot be normalized. An unauthorized request is a
    /// [`Verdict::Reject`], not an error.
    pub fn check<R>(&self, request: &R) -> AccessResult<Verdict>
    where
        R: AccessRequest + ?Sized,
    {
        let handler = ResourceRef::handler_named(request.handler_name());
        let action = request.action_name();

        if !self.config.lock_by_default && !self.keeper.is_locked(&handler, None)? {
            tracing::trace!(handler = request.handler_name(), action, "Handler not locked");
            return Ok(Verdict::Proceed);
        }

        let clearances = self.clearances(request);
        if self.keeper.is_allowed(&clearances, action, &handler, None)? {
            return Ok(Verdict::Proceed);
        }

        tracing::debug!(
            handler = request.handler_name(),
            action,
            roles = ?clearances.names(),
            "Access denied"
        );
        Ok(Verdict::Reject(self.reject(RejectOptions::default())))
    }

    /// Build a rejection, applying any overrides.
    pub fn reject(&self, options: RejectOptions) -> Rejection {
        Rejection {
            location: options
                .location
                .unwrap_or_else(|| self.config.redirect_location.clone()),
            message: options
                .message
                .unwrap_or_else(|| self.config.denial_message.clone()),
        }
    }

    /// Roles the request is checked with.
    fn clearances<R>(&self, request: &R) -> Clearances
    where
        R: AccessRequest + ?Sized,
    {
        if let Some(levels) = request.clearance_levels() {
            return levels;
        }

        if self.config.legacy_role_accessor {
            #[allow(deprecated)]
            let legacy = request.clearance_level();
            if let Some(level) = legacy {
                if !LEGACY_ACCESSOR_WARNED.swap(true, Ordering::Relaxed) {
                    tracing::warn!(
                        handler = request.handler_name(),
                        "Request uses the singular `clearance_level` accessor, \
                         rename it to `clearance_levels`"
                    );
                }
                return level;
            }
        }

        Clearances::One(self.config.guest_role.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_keeper::KeeperConfig;

    struct Request {
        roles: Option<Clearances>,
        role: Option<Clearances>,
        action: &'static str,
        handler: &'static str,
    }

    impl Request {
        fn new(handler: &'static str, action: &'static str) -> Self {
            Self {
                roles: None,
                role: None,
                action,
                handler,
            }
        }

        fn roles(mut self, roles: impl Into<Clearances>) -> Self {
            self.roles = Some(roles.into());
            self
        }

        fn role(mut self, role: impl Into<Clearances>) -> Self {
            self.role = Some(role.into());
            self
        }
    }

    impl AccessRequest for Request {
        fn clearance_levels(&self) -> Option<Clearances> {
            self.roles.clone()
        }

        fn clearance_level(&self) -> Option<Clearances> {
            self.role.clone()
        }

        fn action_name(&self) -> &str {
            self.action
        }

        fn handler_name(&self) -> &str {
            self.handler
        }
    }

    fn keeper() -> Keeper {
        let keeper = Keeper::new(KeeperConfig::default()).unwrap();
        keeper.register_handler("PostsController").unwrap();
        keeper.register_handler("PagesController").unwrap();
        keeper.lock("posts", None).unwrap();
        keeper.grant("editor", ["edit", "update"], "posts", None).unwrap();
        keeper.grant("guest", "index", "posts", None).unwrap();
        keeper
    }

    #[test]
    fn test_unlocked_handler_proceeds() {
        let keeper = keeper();
        let guard = Guard::new(&keeper, GuardConfig::default()).unwrap();
        let verdict = guard.check(&Request::new("PagesController", "show")).unwrap();
        assert_eq!(verdict, Verdict::Proceed);
    }

    #[test]
    fn test_lock_by_default_rejects_undeclared_handler() {
        let keeper = keeper();
        let config = GuardConfig {
            lock_by_default: true,
            ..GuardConfig::default()
        };
        let guard = Guard::new(&keeper, config).unwrap();
        let verdict = guard
            .check(&Request::new("PagesController", "show").roles("admin"))
            .unwrap();
        assert!(!verdict.is_proceed());
    }

    #[test]
    fn test_locked_handler_checks_roles() {
        let keeper = keeper();
        let guard = Guard::new(&keeper, GuardConfig::default()).unwrap();

        let editor = Request::new("PostsController", "edit").roles(vec!["user", "editors"]);
        assert!(guard.check(&editor).unwrap().is_proceed());

        let user = Request::new("PostsController", "edit").roles("user");
        let verdict = guard.check(&user).unwrap();
        assert_eq!(
            verdict.rejection(),
            Some(&Rejection {
                location: "/".to_string(),
                message: "Not authorized.".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_clearance_falls_back_to_guest() {
        let keeper = keeper();
        let guard = Guard::new(&keeper, GuardConfig::default()).unwrap();
        assert!(guard
            .check(&Request::new("PostsController", "index"))
            .unwrap()
            .is_proceed());
        assert!(!guard
            .check(&Request::new("PostsController", "edit"))
            .unwrap()
            .is_proceed());
    }

    #[test]
    fn test_legacy_accessor() {
        let keeper = keeper();
        let guard = Guard::new(&keeper, GuardConfig::default()).unwrap();
        let legacy = Request::new("PostsController", "edit").role("editor");
        assert!(guard.check(&legacy).unwrap().is_proceed());
        assert!(LEGACY_ACCESSOR_WARNED.load(Ordering::Relaxed));

        // A second guard reuses the process-wide flag.
        let another = Guard::new(&keeper, GuardConfig::default()).unwrap();
        assert!(another.check(&legacy).unwrap().is_proceed());
        assert!(LEGACY_ACCESSOR_WARNED.load(Ordering::Relaxed));

        // The plural accessor wins when both are present.
        let both = Request::new("PostsController", "edit")
            .roles("user")
            .role("editor");
        assert!(!guard.check(&both).unwrap().is_proceed());

        let strict = Guard::new(
            &keeper,
            GuardConfig {
                legacy_role_accessor: false,
                ..GuardConfig::default()
            },
        )
        .unwrap();
        assert!(!strict.check(&legacy).unwrap().is_proceed());
    }

    #[test]
    fn test_reject_options() {
        let keeper = keeper();
        let guard = Guard::new(&keeper, GuardConfig::default()).unwrap();

        let rejection = guard.reject(RejectOptions::default());
        assert_eq!(rejection.location, "/");
        assert_eq!(rejection.message, "Not authorized.");

        let rejection = guard.reject(
            RejectOptions::default()
                .with_message("Drafts are private.")
                .with_location("/posts"),
        );
        assert_eq!(rejection.location, "/posts");
        assert_eq!(rejection.message, "Drafts are private.");
    }

    #[test]
    fn test_unknown_handler_is_an_error() {
        let keeper = keeper();
        let guard = Guard::new(&keeper, GuardConfig::default()).unwrap();
        let err = guard
            .check(&Request::new("CommentsController", "index"))
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_RESOURCE");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let keeper = keeper();
        let config = GuardConfig {
            guest_role: String::new(),
            ..GuardConfig::default()
        };
        let err = Guard::new(&keeper, config).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_verdict_serde() {
        let verdict = Verdict::Reject(Rejection {
            location: "/".to_string(),
            message: "Not authorized.".to_string(),
        });
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "verdict": "reject",
                "location": "/",
                "message": "Not authorized.",
            })
        );
        assert_eq!(
            serde_json::to_value(Verdict::Proceed).unwrap(),
            serde_json::json!({"verdict": "proceed"})
        );
    }
}
