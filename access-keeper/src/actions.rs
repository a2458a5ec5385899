//! # Actions
//!
//! Named operations on a resource (`index`, `show`, `edit`, ...). Actions are
//! verbs, so they are normalized to a lowercase symbol but never singularized.
//! The reserved action `all` stands for every action on a resource.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AccessError, AccessResult};

/// A normalized action identifier.
///
/// # Example
///
/// ```
/// use access_keeper::Action;
///
/// let action = Action::parse(" Edit ").unwrap();
/// assert_eq!(action.as_str(), "edit");
/// assert!(Action::parse("all").unwrap().is_wildcard());
/// assert!(Action::parse("drop table").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Action(String);

impl Action {
    /// Reserved token granting every action.
    pub const ALL: &'static str = "all";

    /// Parse and normalize an action name.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MalformedAction`] if the value is empty or
    /// contains characters other than alphanumerics, `_` and `-`.
    pub fn parse(s: &str) -> AccessResult<Self> {
        normalize_symbol(s)
            .map(Self)
            .ok_or_else(|| AccessError::MalformedAction(s.to_string()))
    }

    /// The wildcard action.
    pub fn all() -> Self {
        Self(Self::ALL.to_string())
    }

    /// Check if this is the wildcard action.
    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::ALL
    }

    /// Get the string representation of the action.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Action {
    type Error = AccessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.0
    }
}

/// Lowercase and trim a symbolic identifier, rejecting anything that is not
/// a plain word.
pub(crate) fn normalize_symbol(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Values accepted wherever one or many actions are expected.
///
/// Implemented for single names (`&str`, `String`, [`Action`]) and for
/// collections of names (arrays, slices, vectors).
pub trait IntoActions {
    /// Normalize into a list of actions.
    fn into_actions(self) -> AccessResult<Vec<Action>>;
}

fn parse_all<I>(names: I) -> AccessResult<Vec<Action>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names.into_iter().map(|n| Action::parse(n.as_ref())).collect()
}

impl IntoActions for Action {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        Ok(vec![self])
    }
}

impl IntoActions for &Action {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        Ok(vec![self.clone()])
    }
}

impl IntoActions for &str {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        Ok(vec![Action::parse(self)?])
    }
}

impl IntoActions for String {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        Ok(vec![Action::parse(&self)?])
    }
}

impl IntoActions for &String {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        Ok(vec![Action::parse(self)?])
    }
}

impl<T: AsRef<str>> IntoActions for Vec<T> {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        parse_all(self)
    }
}

impl<T: AsRef<str>> IntoActions for &[T] {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        parse_all(self)
    }
}

impl<T: AsRef<str>, const N: usize> IntoActions for [T; N] {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        parse_all(self)
    }
}

impl<T: AsRef<str>, const N: usize> IntoActions for &[T; N] {
    fn into_actions(self) -> AccessResult<Vec<Action>> {
        parse_all(self)
    }
}
