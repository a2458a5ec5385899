//! # Keeper
//!
//! The rule registry. Stores, per resource, which actions each role may
//! perform, and answers whether a set of roles authorizes an action.
//!
//! ## Lookup order
//!
//! ```text
//! is_allowed(roles, action, resource)
//!   1. resolve resource          (unknown handler  => Err(UnknownResource))
//!   2. run handler declaration   (once per handler, on first lookup)
//!   3. no rules for resource     => false
//!   4. role `all` permits action => true
//!   5. any given role permits    => true
//!   6.                           => false
//! ```
//!
//! A role permits an action when its action set holds the action or the
//! wildcard action `all`.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use crate::actions::{Action, IntoActions};
use crate::config::KeeperConfig;
use crate::declare::{AccessRules, DeclareFn, Handler};
use crate::error::{AccessError, AccessResult};
use crate::resources::{ResourceId, ResourceRef};
use crate::roles::{IntoRoles, Role};

type RuleMap = HashMap<ResourceId, HashMap<Role, HashSet<Action>>>;

static GLOBAL: OnceLock<Keeper> = OnceLock::new();

/// Snapshot of the rules registered for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRules {
    /// The resource the rules apply to.
    pub resource: ResourceId,
    /// Actions granted per role.
    pub grants: BTreeMap<Role, BTreeSet<Action>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclareState {
    Pending,
    Running(ThreadId),
    Done,
}

/// Declaration progress, tagged with the reload generation it belongs to.
#[derive(Debug)]
struct Declaration {
    state: DeclareState,
    generation: u64,
}

/// Catalog entry for a known handler.
struct HandlerEntry {
    declare: Option<DeclareFn>,
    declaration: Mutex<Declaration>,
    ready: Condvar,
}

impl HandlerEntry {
    fn new(declare: Option<DeclareFn>) -> Self {
        Self {
            declare,
            declaration: Mutex::new(Declaration {
                state: DeclareState::Pending,
                generation: 0,
            }),
            ready: Condvar::new(),
        }
    }

    fn declaration(&self) -> MutexGuard<'_, Declaration> {
        self.declaration.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets a running declaration to pending if it unwinds before finishing.
struct RunningDeclaration<'a> {
    entry: &'a HandlerEntry,
    finished: bool,
}

impl Drop for RunningDeclaration<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.entry.declaration().state = DeclareState::Pending;
            self.entry.ready.notify_all();
        }
    }
}

/// The access rule registry.
///
/// One process-wide instance is available through [`Keeper::global`]; private
/// instances can be created with [`Keeper::new`] for embedding and tests.
///
/// # Example
///
/// ```
/// use access_keeper::{Keeper, KeeperConfig};
///
/// let keeper = Keeper::new(KeeperConfig::default()).unwrap();
/// keeper.register_handler("ArticlesController").unwrap();
///
/// keeper.grant("admin", "all", "articles", None).unwrap();
/// keeper.grant("editors", ["index", "show", "edit", "update"], "articles", None).unwrap();
/// keeper.grant("user", ["index", "show"], "articles", None).unwrap();
///
/// assert!(keeper.is_allowed("admin", "destroy", "articles", None).unwrap());
/// assert!(!keeper.is_allowed("editor", "destroy", "articles", None).unwrap());
/// assert!(!keeper.is_allowed("user", "edit", "articles", None).unwrap());
/// assert!(keeper.is_allowed(["user", "editor"], "edit", "articles", None).unwrap());
/// ```
pub struct Keeper {
    config: KeeperConfig,
    rules: RwLock<RuleMap>,
    handlers: RwLock<HashMap<ResourceId, Arc<HandlerEntry>>>,
    locked: RwLock<HashSet<ResourceId>>,
}

impl Keeper {
    /// Create an empty keeper.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Config`] if the configuration is invalid.
    pub fn new(config: KeeperConfig) -> AccessResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rules: RwLock::new(HashMap::new()),
            handlers: RwLock::new(HashMap::new()),
            locked: RwLock::new(HashSet::new()),
        })
    }

    /// The process-wide keeper.
    ///
    /// Configured from the environment on first use; an invalid environment
    /// configuration falls back to the defaults with a warning.
    pub fn global() -> &'static Keeper {
        GLOBAL.get_or_init(|| {
            Keeper::new(KeeperConfig::from_env()).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid keeper configuration, using defaults");
                Keeper::with_defaults()
            })
        })
    }

    fn with_defaults() -> Self {
        Self {
            config: KeeperConfig::default(),
            rules: RwLock::new(HashMap::new()),
            handlers: RwLock::new(HashMap::new()),
            locked: RwLock::new(HashSet::new()),
        }
    }

    /// Get the keeper configuration.
    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    // Handler catalog

    /// Register a handler without a declaration hook.
    ///
    /// Registering the same name again keeps the first registration.
    pub fn register_handler(&self, name: &str) -> AccessResult<ResourceId> {
        self.insert_handler(name, None)
    }

    /// Register a handler with a declaration hook run on first lookup.
    pub fn register_handler_with(&self, name: &str, declare: DeclareFn) -> AccessResult<ResourceId> {
        self.insert_handler(name, Some(declare))
    }

    /// Register a [`Handler`] type and its declarations.
    pub fn mount<H: Handler>(&self) -> AccessResult<ResourceId> {
        self.insert_handler(H::NAME, Some(H::declare_access as DeclareFn))
    }

    fn insert_handler(&self, name: &str, declare: Option<DeclareFn>) -> AccessResult<ResourceId> {
        let id = ResourceId::parse(name)?;
        let mut handlers = write(&self.handlers);
        if handlers.contains_key(&id) {
            tracing::debug!(handler = %id, "Handler already registered");
        } else {
            tracing::debug!(handler = %id, declares = declare.is_some(), "Registered handler");
            handlers.insert(id.clone(), Arc::new(HandlerEntry::new(declare)));
        }
        Ok(id)
    }

    /// All registered handlers, sorted by name.
    pub fn handlers(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = read(&self.handlers).keys().cloned().collect();
        ids.sort();
        ids
    }

    // Resolution

    /// Resolve a resource reference to its identifier.
    ///
    /// # Errors
    ///
    /// - [`AccessError::MalformedResource`] / [`AccessError::MalformedNamespace`]
    ///   if no valid handler name can be derived
    /// - [`AccessError::UnknownResource`] if handler validation is enabled and
    ///   no handler is registered under the derived name
    pub fn resolve(
        &self,
        resource: impl Into<ResourceRef>,
        namespace: Option<&str>,
    ) -> AccessResult<ResourceId> {
        let id = resource
            .into()
            .derive(namespace, &self.config.handler_suffix)?;
        if self.config.validate_handlers && !read(&self.handlers).contains_key(&id) {
            return Err(AccessError::UnknownResource { name: id.into() });
        }
        Ok(id)
    }

    /// Run the handler's declaration hook if it has not run yet.
    ///
    /// Concurrent callers wait for the first one to finish. A hook that
    /// looks up its own handler sees the rules declared so far. A hook
    /// overtaken by [`reload`](Self::reload) runs again before the handler
    /// counts as declared.
    fn ensure_declared(&self, id: &ResourceId) -> AccessResult<()> {
        let Some(entry) = read(&self.handlers).get(id).cloned() else {
            return Ok(());
        };
        let Some(declare) = entry.declare else {
            return Ok(());
        };

        let me = thread::current().id();
        let mut declaration = entry.declaration();
        loop {
            match declaration.state {
                DeclareState::Done => return Ok(()),
                DeclareState::Running(owner) if owner == me => return Ok(()),
                DeclareState::Running(_) => {
                    declaration = entry
                        .ready
                        .wait(declaration)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                DeclareState::Pending => break,
            }
        }

        loop {
            let generation = declaration.generation;
            declaration.state = DeclareState::Running(me);
            drop(declaration);

            let mut running = RunningDeclaration {
                entry: entry.as_ref(),
                finished: false,
            };
            tracing::debug!(handler = %id, generation, "Running handler access declarations");
            let result = declare(&mut AccessRules::new(self, id.clone()));
            running.finished = true;
            drop(running);

            declaration = entry.declaration();
            match result {
                Err(e) => {
                    declaration.state = DeclareState::Pending;
                    drop(declaration);
                    entry.ready.notify_all();
                    return Err(e);
                }
                Ok(()) if declaration.generation != generation => {
                    tracing::debug!(handler = %id, "Handler reloaded during declaration");
                }
                Ok(()) => {
                    declaration.state = DeclareState::Done;
                    drop(declaration);
                    entry.ready.notify_all();
                    return Ok(());
                }
            }
        }
    }

    // Rules

    /// Allow `roles` to perform `actions` on `resource`.
    ///
    /// Roles and actions may be single names or collections, singular or
    /// plural, and either may be the wildcard `all`. Grants accumulate:
    /// actions are added to whatever the role already holds.
    ///
    /// # Errors
    ///
    /// Fails only if a role, action or the resource cannot be resolved.
    pub fn grant(
        &self,
        roles: impl IntoRoles,
        actions: impl IntoActions,
        resource: impl Into<ResourceRef>,
        namespace: Option<&str>,
    ) -> AccessResult<()> {
        let roles = roles.into_roles()?;
        let actions = actions.into_actions()?;
        let id = self.resolve(resource, namespace)?;
        self.insert_rules(&id, roles, actions);
        Ok(())
    }

    pub(crate) fn insert_rules(&self, id: &ResourceId, roles: Vec<Role>, actions: Vec<Action>) {
        tracing::debug!(
            resource = %id,
            roles = ?roles.iter().map(Role::as_str).collect::<Vec<_>>(),
            actions = ?actions.iter().map(Action::as_str).collect::<Vec<_>>(),
            "Granted access"
        );

        let mut rules = write(&self.rules);
        let by_role = rules.entry(id.clone()).or_default();
        for role in roles {
            by_role
                .entry(role)
                .or_default()
                .extend(actions.iter().cloned());
        }
    }

    /// Check whether any of `roles` may perform `action` on `resource`.
    ///
    /// Denial is `Ok(false)`, never an error.
    ///
    /// # Errors
    ///
    /// Fails if a role, the action or the resource cannot be resolved, or if
    /// the handler's declarations fail.
    pub fn is_allowed(
        &self,
        roles: impl IntoRoles,
        action: impl AsRef<str>,
        resource: impl Into<ResourceRef>,
        namespace: Option<&str>,
    ) -> AccessResult<bool> {
        let roles = roles.into_roles()?;
        let action = Action::parse(action.as_ref())?;
        let id = self.resolve(resource, namespace)?;
        self.ensure_declared(&id)?;

        let allowed = self.permits(&id, &roles, &action);
        tracing::trace!(resource = %id, action = %action, allowed, "Checked access");
        Ok(allowed)
    }

    fn permits(&self, id: &ResourceId, roles: &[Role], action: &Action) -> bool {
        let rules = read(&self.rules);
        let Some(by_role) = rules.get(id) else {
            return false;
        };

        let wildcard = Action::all();
        let role_permits = |role: &Role| {
            by_role
                .get(role)
                .is_some_and(|actions| actions.contains(&wildcard) || actions.contains(action))
        };

        role_permits(&Role::all()) || roles.iter().any(role_permits)
    }

    /// Snapshot of the rules registered for `resource`, if any.
    pub fn rules_for(
        &self,
        resource: impl Into<ResourceRef>,
        namespace: Option<&str>,
    ) -> AccessResult<Option<ResourceRules>> {
        let id = self.resolve(resource, namespace)?;
        self.ensure_declared(&id)?;

        let rules = read(&self.rules);
        Ok(rules.get(&id).map(|by_role| ResourceRules {
            resource: id.clone(),
            grants: by_role
                .iter()
                .map(|(role, actions)| (role.clone(), actions.iter().cloned().collect()))
                .collect(),
        }))
    }

    /// Resources that have rules registered, sorted by name.
    pub fn resources(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = read(&self.rules).keys().cloned().collect();
        ids.sort();
        ids
    }

    // Locking

    /// Mark `resource` as access-restricted.
    pub fn lock(
        &self,
        resource: impl Into<ResourceRef>,
        namespace: Option<&str>,
    ) -> AccessResult<ResourceId> {
        let id = self.resolve(resource, namespace)?;
        self.lock_id(&id);
        Ok(id)
    }

    pub(crate) fn lock_id(&self, id: &ResourceId) {
        if write(&self.locked).insert(id.clone()) {
            tracing::debug!(resource = %id, "Locked resource");
        }
    }

    /// Check whether `resource` is access-restricted.
    ///
    /// Runs the handler's declarations first, since declaring a rule locks
    /// the handler.
    pub fn is_locked(
        &self,
        resource: impl Into<ResourceRef>,
        namespace: Option<&str>,
    ) -> AccessResult<bool> {
        let id = self.resolve(resource, namespace)?;
        self.ensure_declared(&id)?;
        Ok(read(&self.locked).contains(&id))
    }

    // Lifecycle

    /// Remove every grant.
    ///
    /// Handler declarations that already ran are not run again, so every
    /// query answers `false` until new grants are registered.
    pub fn reset(&self) {
        write(&self.rules).clear();
        tracing::info!("Access rules reset");
    }

    /// Remove every grant and lock, and re-arm handler declarations.
    ///
    /// For hosts that reload handler code in place: each handler's
    /// declarations run again, once, on its next lookup. A declaration still
    /// running when the reload happens is run again by its caller.
    pub fn reload(&self) {
        write(&self.rules).clear();
        write(&self.locked).clear();
        for entry in read(&self.handlers).values() {
            let mut declaration = entry.declaration();
            declaration.generation += 1;
            if declaration.state == DeclareState::Done {
                declaration.state = DeclareState::Pending;
            }
        }
        tracing::info!("Access rules reloaded");
    }
}

impl std::fmt::Debug for Keeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keeper")
            .field("config", &self.config)
            .field("handlers", &read(&self.handlers).len())
            .field("resources", &read(&self.rules).len())
            .finish()
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn keeper() -> Keeper {
        let keeper = Keeper::new(KeeperConfig::default()).unwrap();
        keeper.register_handler("PostsController").unwrap();
        keeper.register_handler("Admin::PostsController").unwrap();
        keeper
    }

    #[test]
    fn test_unauthorized_accesses_are_not_allowed() {
        let keeper = keeper();
        assert!(!keeper.is_allowed("user", "edit", "posts", None).unwrap());
        assert!(!keeper.is_allowed("user", "edit", "posts", Some("admin")).unwrap());
    }

    #[test]
    fn test_authorized_accesses_are_allowed() {
        let keeper = keeper();
        keeper.grant("editor", ["edit", "update"], "posts", None).unwrap();
        assert!(keeper.is_allowed("editor", "edit", "posts", None).unwrap());
        assert!(keeper.is_allowed("editor", "update", "posts", None).unwrap());
        assert!(!keeper.is_allowed("editor", "destroy", "posts", None).unwrap());

        keeper.grant(["user", "nerd"], ["index", "show"], "posts", None).unwrap();
        assert!(keeper.is_allowed("user", "index", "posts", None).unwrap());
        assert!(keeper.is_allowed("nerd", "index", "posts", None).unwrap());
    }

    #[test]
    fn test_multiple_roles_any_order() {
        let keeper = keeper();
        keeper.grant(["user", "nerd"], ["index", "show"], "posts", None).unwrap();

        let orders = [
            ["user", "other", "whatnot"],
            ["other", "user", "whatnot"],
            ["other", "whatnot", "user"],
            ["user", "nerd", "other"],
            ["nerd", "user", "other"],
            ["other", "nerd", "user"],
            ["other", "user", "nerd"],
        ];
        for roles in orders {
            assert!(keeper.is_allowed(roles, "index", "posts", None).unwrap(), "{roles:?}");
        }
        assert!(!keeper.is_allowed(["other", "whatnot"], "index", "posts", None).unwrap());
    }

    #[test]
    fn test_namespaces_are_distinct_resources() {
        let keeper = keeper();
        keeper.grant("admin", ["new", "create"], "posts", Some("admin")).unwrap();
        assert!(keeper.is_allowed("admin", "new", "posts", Some("admin")).unwrap());
        assert!(keeper.is_allowed("admin", "create", "post", Some("admin")).unwrap());
        assert!(!keeper.is_allowed("admin", "new", "posts", None).unwrap());
    }

    #[test]
    fn test_wildcard_role_and_action() {
        let keeper = keeper();
        keeper.grant("all", "show", "posts", None).unwrap();
        keeper.grant("admin", "all", "posts", None).unwrap();

        assert!(keeper.is_allowed("nobody", "show", "posts", None).unwrap());
        assert!(!keeper.is_allowed("nobody", "edit", "posts", None).unwrap());
        assert!(keeper.is_allowed("admins", "anything", "posts", None).unwrap());
    }

    #[test]
    fn test_plural_and_singular_roles_match() {
        let keeper = keeper();
        keeper.grant("editors", "edit", "posts", None).unwrap();
        keeper.grant("reviewer", "show", "posts", None).unwrap();
        assert!(keeper.is_allowed("editor", "edit", "posts", None).unwrap());
        assert!(keeper.is_allowed("reviewers", "show", "posts", None).unwrap());
    }

    #[test]
    fn test_grants_accumulate_without_duplicates() {
        let keeper = keeper();
        keeper.grant("editor", "edit", "posts", None).unwrap();
        keeper.grant("editor", "edit", "posts", None).unwrap();
        keeper.grant("editor", "update", "posts", None).unwrap();

        let rules = keeper.rules_for("posts", None).unwrap().unwrap();
        let editor = &rules.grants[&Role::parse("editor").unwrap()];
        let names: Vec<&str> = editor.iter().map(Action::as_str).collect();
        assert_eq!(names, vec!["edit", "update"]);
    }

    #[test]
    fn test_unknown_resource_is_an_error() {
        let keeper = keeper();
        let err = keeper.grant("admin", "all", "articles", None).unwrap_err();
        assert!(matches!(err, AccessError::UnknownResource { ref name } if name == "ArticlesController"));
        assert!(keeper.is_allowed("admin", "index", "posts", Some("api")).is_err());
    }

    #[test]
    fn test_unvalidated_keeper_accepts_any_name() {
        let keeper = Keeper::new(KeeperConfig {
            validate_handlers: false,
            ..KeeperConfig::default()
        })
        .unwrap();
        keeper.grant("admin", "all", "articles", None).unwrap();
        assert!(keeper.is_allowed("admin", "index", "article", None).unwrap());
        assert!(!keeper.is_allowed("admin", "index", "comments", None).unwrap());
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let keeper = keeper();
        assert!(matches!(
            keeper.grant("", "edit", "posts", None),
            Err(AccessError::MalformedRole(_))
        ));
        assert!(matches!(
            keeper.is_allowed("admin", "edit it", "posts", None),
            Err(AccessError::MalformedAction(_))
        ));
    }

    #[test]
    fn test_reset_clears_every_grant() {
        let keeper = keeper();
        keeper.grant("admin", "all", "posts", None).unwrap();
        keeper.grant("all", "index", "posts", Some("admin")).unwrap();
        assert!(keeper.is_allowed("admin", "edit", "posts", None).unwrap());

        keeper.reset();
        assert!(!keeper.is_allowed("admin", "edit", "posts", None).unwrap());
        assert!(!keeper.is_allowed("guest", "index", "posts", Some("admin")).unwrap());
        assert!(keeper.resources().is_empty());
    }

    static DECLARATIONS: AtomicUsize = AtomicUsize::new(0);

    fn declare_counted(rules: &mut AccessRules<'_>) -> AccessResult<()> {
        DECLARATIONS.fetch_add(1, Ordering::SeqCst);
        rules.permit("editor", "edit")
    }

    #[test]
    fn test_declarations_run_once_and_again_after_reload() {
        let keeper = Keeper::new(KeeperConfig::default()).unwrap();
        keeper
            .register_handler_with("CommentsController", declare_counted)
            .unwrap();
        let before = DECLARATIONS.load(Ordering::SeqCst);

        assert!(keeper.is_allowed("editor", "edit", "comments", None).unwrap());
        assert!(keeper.is_allowed("editors", "edit", "comment", None).unwrap());
        assert_eq!(DECLARATIONS.load(Ordering::SeqCst) - before, 1);

        keeper.reset();
        assert!(!keeper.is_allowed("editor", "edit", "comments", None).unwrap());
        assert_eq!(DECLARATIONS.load(Ordering::SeqCst) - before, 1);

        keeper.reload();
        assert!(!keeper.resources().contains(&ResourceId::parse("CommentsController").unwrap()));
        assert!(keeper.is_allowed("editor", "edit", "comments", None).unwrap());
        assert_eq!(DECLARATIONS.load(Ordering::SeqCst) - before, 2);
    }

    fn declare_failing(rules: &mut AccessRules<'_>) -> AccessResult<()> {
        rules.permit("editor", "not an action")
    }

    #[test]
    fn test_failed_declaration_is_reported_and_retried() {
        let keeper = Keeper::new(KeeperConfig::default()).unwrap();
        keeper
            .register_handler_with("DraftsController", declare_failing)
            .unwrap();
        assert!(matches!(
            keeper.is_allowed("editor", "edit", "drafts", None),
            Err(AccessError::MalformedAction(_))
        ));
        assert!(keeper.is_allowed("editor", "edit", "drafts", None).is_err());
    }

    fn declare_slowly(rules: &mut AccessRules<'_>) -> AccessResult<()> {
        rules.permit("editor", "edit")?;
        thread::sleep(std::time::Duration::from_millis(200));
        rules.permit("user", "show")
    }

    #[test]
    fn test_reload_during_declaration_keeps_every_grant() {
        let keeper = Keeper::new(KeeperConfig::default()).unwrap();
        keeper
            .register_handler_with("ReviewsController", declare_slowly)
            .unwrap();

        thread::scope(|scope| {
            let lookup = scope.spawn(|| keeper.is_allowed("user", "show", "reviews", None));
            thread::sleep(std::time::Duration::from_millis(50));
            keeper.reload();
            assert!(lookup.join().unwrap().unwrap());
        });

        assert!(keeper.is_allowed("editor", "edit", "reviews", None).unwrap());
        assert!(keeper.is_allowed("user", "show", "reviews", None).unwrap());
        assert!(keeper.is_locked("reviews", None).unwrap());
    }

    #[test]
    fn test_register_handler_rejects_bad_names() {
        let keeper = keeper();
        assert!(matches!(
            keeper.register_handler("posts_controller"),
            Err(AccessError::InvalidHandlerName(_))
        ));
        let ids = keeper.handlers();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].as_str(), "Admin::PostsController");
    }

    #[test]
    fn test_lock() {
        let keeper = keeper();
        assert!(!keeper.is_locked("posts", None).unwrap());
        let id = keeper.lock("posts", None).unwrap();
        assert_eq!(id.as_str(), "PostsController");
        assert!(keeper.is_locked("post", None).unwrap());
        assert!(!keeper.is_locked("posts", Some("admin")).unwrap());
    }

    #[test]
    fn test_rules_snapshot_serializes() {
        let keeper = keeper();
        keeper.grant(["admins", "editor"], ["show", "edit"], "posts", None).unwrap();
        let rules = keeper.rules_for("posts", None).unwrap().unwrap();
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "resource": "PostsController",
                "grants": {
                    "admin": ["edit", "show"],
                    "editor": ["edit", "show"],
                }
            })
        );
        assert!(keeper.rules_for("posts", Some("admin")).unwrap().is_none());
    }
}
