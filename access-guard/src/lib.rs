//! # Access Guard
//!
//! Request-time enforcement of the rules kept by [`access_keeper`].
//!
//! ## Overview
//!
//! The access-guard crate provides:
//! - **AccessRequest**: What the guard needs to know about a request
//! - **Guard**: Proceed-or-reject decisions, with configurable rejections
//! - **Principal**: `can(action, resource)` queries for users and services
//! - **GuardConfig**: Redirect target, denial message and locking policy
//!
//! ## Usage
//!
//! ```rust
//! use access_guard::{AccessRequest, Guard, GuardConfig, Verdict};
//! use access_keeper::{AccessResult, AccessRules, Handler, Keeper, KeeperConfig};
//!
//! struct SecretsController;
//!
//! impl Handler for SecretsController {
//!     const NAME: &'static str = "SecretsController";
//!
//!     fn declare_access(rules: &mut AccessRules<'_>) -> AccessResult<()> {
//!         rules.permit("admin", "index")
//!     }
//! }
//!
//! struct Request;
//!
//! impl AccessRequest for Request {
//!     fn action_name(&self) -> &str {
//!         "index"
//!     }
//!     fn handler_name(&self) -> &str {
//!         SecretsController::NAME
//!     }
//! }
//!
//! let keeper = Keeper::new(KeeperConfig::default()).unwrap();
//! keeper.mount::<SecretsController>().unwrap();
//!
//! let guard = Guard::new(&keeper, GuardConfig::default()).unwrap();
//! match guard.check(&Request).unwrap() {
//!     Verdict::Proceed => unreachable!("guests may not list secrets"),
//!     Verdict::Reject(rejection) => assert_eq!(rejection.location, "/"),
//! }
//! ```

pub mod config;
pub mod guard;
pub mod principal;
pub mod request;

// Re-export main types for convenience
pub use config::GuardConfig;
pub use guard::{Guard, RejectOptions, Rejection, Verdict};
pub use principal::Principal;
pub use request::AccessRequest;
