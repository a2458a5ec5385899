//! # Roles
//!
//! Clearance levels held by a principal. Role names are normalized to a
//! lowercase, singular symbol so that `editors` and `editor` name the same
//! role wherever they appear.
//!
//! Two role names are reserved:
//! - `all`: every principal, whatever roles it holds (or none)
//! - `guest`: the default clearance of a principal with no roles

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::normalize_symbol;
use crate::error::{AccessError, AccessResult};
use crate::inflect::singularize;

/// A normalized, singular role identifier.
///
/// # Example
///
/// ```
/// use access_keeper::Role;
///
/// assert_eq!(Role::parse("Editors").unwrap(), Role::parse("editor").unwrap());
/// assert_eq!(Role::parse("site_admins").unwrap().as_str(), "site_admin");
/// assert!(Role::parse("all").unwrap().is_wildcard());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    /// Reserved role matching every principal.
    pub const ALL: &'static str = "all";

    /// Reserved default role for principals without clearance.
    pub const GUEST: &'static str = "guest";

    /// Parse and normalize a role name.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MalformedRole`] if the value is empty or
    /// contains characters other than alphanumerics, `_` and `-`, or if its
    /// singular form is empty (`s`).
    pub fn parse(s: &str) -> AccessResult<Self> {
        normalize_symbol(s)
            .map(|symbol| singularize(&symbol))
            .filter(|singular| !singular.is_empty())
            .map(Self)
            .ok_or_else(|| AccessError::MalformedRole(s.to_string()))
    }

    /// The wildcard role.
    pub fn all() -> Self {
        Self(Self::ALL.to_string())
    }

    /// The guest role.
    pub fn guest() -> Self {
        Self(Self::GUEST.to_string())
    }

    /// Check if this is the wildcard role.
    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::ALL
    }

    /// Get the string representation of the role.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Role {
    type Error = AccessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

/// Role value(s) as supplied by an external accessor: a single identifier or
/// an ordered list of them.
///
/// # Example
///
/// ```
/// use access_keeper::{Clearances, IntoRoles};
///
/// let one = Clearances::from("admin");
/// let many = Clearances::from(vec!["users", "editors"]);
/// assert_eq!(one.into_roles().unwrap().len(), 1);
/// assert_eq!(many.into_roles().unwrap()[1].as_str(), "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Clearances {
    /// A single role identifier.
    One(String),
    /// An ordered collection of role identifiers.
    Many(Vec<String>),
}

impl Clearances {
    /// Clearances of a principal without any role.
    pub fn guest() -> Self {
        Clearances::One(Role::GUEST.to_string())
    }

    /// Parse a comma separated list (`"admin, editor"`).
    ///
    /// Empty entries are skipped.
    pub fn from_csv(s: &str) -> Self {
        Clearances::Many(
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Get the raw identifiers in order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Clearances::One(name) => vec![name.as_str()],
            Clearances::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for Clearances {
    fn from(s: &str) -> Self {
        Clearances::One(s.to_string())
    }
}

impl From<String> for Clearances {
    fn from(s: String) -> Self {
        Clearances::One(s)
    }
}

impl From<Role> for Clearances {
    fn from(role: Role) -> Self {
        Clearances::One(role.into())
    }
}

impl From<Vec<String>> for Clearances {
    fn from(names: Vec<String>) -> Self {
        Clearances::Many(names)
    }
}

impl From<Vec<&str>> for Clearances {
    fn from(names: Vec<&str>) -> Self {
        Clearances::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Role>> for Clearances {
    fn from(roles: Vec<Role>) -> Self {
        Clearances::Many(roles.into_iter().map(String::from).collect())
    }
}

/// Values accepted wherever one or many roles are expected.
///
/// Implemented for single names (`&str`, `String`, [`Role`]), collections of
/// names (arrays, slices, vectors) and [`Clearances`].
pub trait IntoRoles {
    /// Normalize into a list of roles.
    fn into_roles(self) -> AccessResult<Vec<Role>>;
}

fn parse_all<I>(names: I) -> AccessResult<Vec<Role>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names.into_iter().map(|n| Role::parse(n.as_ref())).collect()
}

impl IntoRoles for Role {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        Ok(vec![self])
    }
}

impl IntoRoles for &Role {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        Ok(vec![self.clone()])
    }
}

impl IntoRoles for &str {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        Ok(vec![Role::parse(self)?])
    }
}

impl IntoRoles for String {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        Ok(vec![Role::parse(&self)?])
    }
}

impl IntoRoles for &String {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        Ok(vec![Role::parse(self)?])
    }
}

impl<T: AsRef<str>> IntoRoles for Vec<T> {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        parse_all(self)
    }
}

impl<T: AsRef<str>> IntoRoles for &[T] {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        parse_all(self)
    }
}

impl<T: AsRef<str>, const N: usize> IntoRoles for [T; N] {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        parse_all(self)
    }
}

impl<T: AsRef<str>, const N: usize> IntoRoles for &[T; N] {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        parse_all(self)
    }
}

impl IntoRoles for Clearances {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        parse_all(self.names())
    }
}

impl IntoRoles for &Clearances {
    fn into_roles(self) -> AccessResult<Vec<Role>> {
        parse_all(self.names())
    }
}
