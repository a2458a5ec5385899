//! # Declarations
//!
//! Handlers declare their own access rules. The declaration runs once, the
//! first time the handler is looked up, so a handler's rules never have to be
//! registered ahead of use.
//!
//! ```
//! use access_keeper::{AccessResult, AccessRules, Handler, Keeper, KeeperConfig};
//!
//! struct ArticlesController;
//!
//! impl Handler for ArticlesController {
//!     const NAME: &'static str = "ArticlesController";
//!
//!     fn declare_access(rules: &mut AccessRules<'_>) -> AccessResult<()> {
//!         rules.permit("admins", "all")?;
//!         rules.permit(["editors", "reviewers"], ["edit", "update"])?;
//!         rules.permit("all", ["index", "show"])?;
//!         Ok(())
//!     }
//! }
//!
//! let keeper = Keeper::new(KeeperConfig::default()).unwrap();
//! keeper.mount::<ArticlesController>().unwrap();
//! assert!(keeper.is_allowed("reviewer", "edit", "articles", None).unwrap());
//! assert!(keeper.is_allowed("guest", "show", "article", None).unwrap());
//! assert!(!keeper.is_allowed("editor", "destroy", "articles", None).unwrap());
//! ```

use crate::actions::IntoActions;
use crate::error::AccessResult;
use crate::keeper::Keeper;
use crate::resources::ResourceId;
use crate::roles::IntoRoles;

/// Declaration hook stored in the handler catalog.
pub type DeclareFn = fn(&mut AccessRules<'_>) -> AccessResult<()>;

/// A request handler type that can be protected.
pub trait Handler {
    /// Fully qualified handler name (`Admin::ArticlesController`).
    const NAME: &'static str;

    /// Declare this handler's access rules.
    ///
    /// Runs once per handler, on first lookup, and again after
    /// [`Keeper::reload`]. Must not query its own handler.
    fn declare_access(_rules: &mut AccessRules<'_>) -> AccessResult<()> {
        Ok(())
    }
}

/// Rule declaration scoped to a single handler.
pub struct AccessRules<'k> {
    keeper: &'k Keeper,
    handler: ResourceId,
}

impl<'k> AccessRules<'k> {
    pub(crate) fn new(keeper: &'k Keeper, handler: ResourceId) -> Self {
        Self { keeper, handler }
    }

    /// The handler these rules apply to.
    pub fn handler(&self) -> &ResourceId {
        &self.handler
    }

    /// Allow `roles` to perform `actions` on this handler.
    ///
    /// Either argument may be a single name or a collection, and either may
    /// be the wildcard `all`. The handler is locked on first use.
    pub fn permit(&mut self, roles: impl IntoRoles, actions: impl IntoActions) -> AccessResult<()> {
        let roles = roles.into_roles()?;
        let actions = actions.into_actions()?;
        self.lock();
        self.keeper.insert_rules(&self.handler, roles, actions);
        Ok(())
    }

    /// Deny every action on this handler that is not explicitly permitted.
    pub fn lock(&mut self) {
        self.keeper.lock_id(&self.handler);
    }
}
