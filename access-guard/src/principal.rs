//! Permission queries from the principal's side.

use access_keeper::{AccessResult, Clearances, Keeper, ResourceRef};

/// A user or service account holding clearance levels.
///
/// `can` answers the same question a [`Guard`](crate::Guard) asks, so views
/// and services can hide what the principal would be rejected from.
///
/// # Example
///
/// ```
/// use access_guard::Principal;
/// use access_keeper::{Clearances, Keeper};
///
/// struct User {
///     roles: String,
/// }
///
/// impl Principal for User {
///     fn clearance_levels(&self) -> Clearances {
///         Clearances::from_csv(&self.roles)
///     }
/// }
///
/// Keeper::global().register_handler("DocsController").unwrap();
/// Keeper::global().grant("writers", "edit", "docs", None).unwrap();
///
/// let user = User { roles: "reader,writer".to_string() };
/// assert!(user.can("edit", "docs", None).unwrap());
/// assert!(!user.can("destroy", "docs", None).unwrap());
/// ```
pub trait Principal {
    /// Roles held by this principal.
    fn clearance_levels(&self) -> Clearances {
        Clearances::guest()
    }

    /// Keeper consulted by [`can`](Self::can).
    fn keeper(&self) -> &Keeper {
        Keeper::global()
    }

    /// Check whether this principal may perform `action` on `resource`.
    ///
    /// `resource` may be a bare name (`"articles"`), a handler reference or
    /// a model instance; see [`ResourceRef`].
    fn can(
        &self,
        action: &str,
        resource: impl Into<ResourceRef>,
        namespace: Option<&str>,
    ) -> AccessResult<bool>
    where
        Self: Sized,
    {
        self.keeper()
            .is_allowed(self.clearance_levels(), action, resource, namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_keeper::{KeeperConfig, Resource};

    struct Anonymous;

    impl Principal for Anonymous {}

    struct Member<'k> {
        keeper: &'k Keeper,
        roles: &'static str,
    }

    impl Principal for Member<'_> {
        fn clearance_levels(&self) -> Clearances {
            Clearances::from_csv(self.roles)
        }

        fn keeper(&self) -> &Keeper {
            self.keeper
        }
    }

    struct Article;

    impl Resource for Article {}

    fn keeper() -> Keeper {
        let keeper = Keeper::new(KeeperConfig::default()).unwrap();
        keeper.register_handler("ArticlesController").unwrap();
        keeper.register_handler("Admin::ArticlesController").unwrap();
        keeper.grant("admin", "all", "articles", None).unwrap();
        keeper.grant("user", ["index", "show"], "articles", None).unwrap();
        keeper.grant("admin", "edit", "articles", Some("admin")).unwrap();
        keeper
    }

    #[test]
    fn test_default_principal_is_guest() {
        assert_eq!(Anonymous.clearance_levels(), Clearances::guest());
        assert!(std::ptr::eq(Anonymous.keeper(), Keeper::global()));
    }

    #[test]
    fn test_can() {
        let keeper = keeper();
        let user = Member { keeper: &keeper, roles: "user" };
        let admin = Member { keeper: &keeper, roles: "admin" };

        assert!(user.can("show", "articles", None).unwrap());
        assert!(!user.can("create", "articles", None).unwrap());
        assert!(admin.can("create", "articles", None).unwrap());
        assert!(admin.can("edit", "articles", None).unwrap());
    }

    #[test]
    fn test_can_with_instance_and_namespace() {
        let keeper = keeper();
        let admin = Member { keeper: &keeper, roles: "admins, users" };

        assert!(admin.can("destroy", ResourceRef::instance(&Article), None).unwrap());
        assert!(admin
            .can("edit", ResourceRef::instance(&Article), Some("admin"))
            .unwrap());
        assert!(!admin.can("destroy", "articles", Some("admin")).unwrap());
    }
}
