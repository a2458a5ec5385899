//! # Access Keeper
//!
//! Role-based access control for request handlers. The keeper stores which
//! actions each role ("clearance level") may perform on each handler, and
//! answers whether a principal holding some set of roles may perform an
//! action.
//!
//! ## Overview
//!
//! The access-keeper crate handles:
//! - **Roles**: Singular, normalized role names (`editors` ≡ `editor`)
//! - **Actions**: Normalized action names (`index`, `edit`, ...)
//! - **Resources**: Handler names derived from bare names, types or instances
//! - **Keeper**: The process-wide rule registry and its query algorithm
//! - **Declarations**: Rules declared by handlers, run on first lookup
//!
//! ## Architecture
//!
//! ```text
//! Rule = Resource + Role + Actions
//!
//! ("posts", namespace "admin")  ──resolve──►  Admin::PostsController
//!
//! Admin::PostsController
//!   ├── admin  → { new, create }
//!   ├── editor → { edit, update }
//!   └── all    → { index, show }      // every role, or none
//! ```
//!
//! ## Wildcards
//!
//! - Role `all`: the grant applies to every principal
//! - Action `all`: the grant covers every action on the resource
//!
//! ## Usage
//!
//! ```rust
//! use access_keeper::{Keeper, KeeperConfig};
//!
//! let keeper = Keeper::new(KeeperConfig::default()).unwrap();
//! keeper.register_handler("Admin::PostsController").unwrap();
//!
//! keeper.grant("admins", ["new", "create"], "posts", Some("admin")).unwrap();
//!
//! assert!(keeper.is_allowed("admin", "new", "post", Some("admin")).unwrap());
//! assert!(!keeper.is_allowed("admin", "destroy", "posts", Some("admin")).unwrap());
//! ```
//!
//! ## Process-wide registry
//!
//! [`Keeper::global`] returns the shared instance used by guards and
//! principals. Hosts that reload handler code call [`Keeper::reload`] so each
//! handler's declarations re-register exactly once.

pub mod actions;
pub mod config;
pub mod declare;
pub mod error;
pub mod inflect;
pub mod keeper;
pub mod resources;
pub mod roles;

// Re-export main types for convenience
pub use actions::{Action, IntoActions};
pub use config::{ConfigError, KeeperConfig};
pub use declare::{AccessRules, DeclareFn, Handler};
pub use error::{AccessError, AccessResult};
pub use keeper::{Keeper, ResourceRules};
pub use resources::{Resource, ResourceId, ResourceRef};
pub use roles::{Clearances, IntoRoles, Role};
