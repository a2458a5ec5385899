//! # Resources
//!
//! A resource is a protected request handler, identified by its fully
//! qualified type name (`Admin::ArticlesController`). Callers may refer to it
//! in several ways, all of which resolve to the same [`ResourceId`]:
//!
//! ```text
//! "articles"              + namespace "admin"  ─┐
//! "article"               + namespace "admin"  ─┤
//! instance of Admin::Article                   ─┼─► Admin::ArticlesController
//! handler Admin::ArticlesController            ─┘
//! ```
//!
//! Name derivation is pure; checking that the handler actually exists is done
//! by the [`Keeper`](crate::Keeper) against its handler catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::declare::Handler;
use crate::error::{AccessError, AccessResult};
use crate::inflect::{camelize, pluralize, split_path};

/// Qualifier joining namespace segments and type names.
pub const QUALIFIER: &str = "::";

/// Canonical identifier of a protected resource.
///
/// Always a valid qualified type name: `::`-separated segments, each starting
/// with an ASCII uppercase letter and containing only alphanumerics and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Parse a fully qualified handler name.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidHandlerName`] if any segment is empty or
    /// not a capitalized identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use access_keeper::ResourceId;
    ///
    /// assert!(ResourceId::parse("Admin::ArticlesController").is_ok());
    /// assert!(ResourceId::parse("admin/articles").is_err());
    /// ```
    pub fn parse(name: &str) -> AccessResult<Self> {
        let valid = !name.is_empty()
            && name.split(QUALIFIER).all(|segment| {
                segment.starts_with(|c: char| c.is_ascii_uppercase())
                    && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(AccessError::InvalidHandlerName(name.to_string()))
        }
    }

    /// Get the string representation of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace segments preceding the type name.
    pub fn namespace(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.0.split(QUALIFIER).collect();
        segments.pop();
        segments
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceId {
    type Error = AccessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

/// A model type whose instances can stand in for their resource.
///
/// An instance of `Article` refers to `ArticlesController`. The default
/// name is the type's own name without module path or generics; override
/// it to map a type elsewhere.
///
/// ```
/// use access_keeper::{Resource, ResourceRef};
///
/// struct Article;
/// impl Resource for Article {}
///
/// assert_eq!(Article.resource_name(), "Article");
/// assert_eq!(ResourceRef::instance(&Article), ResourceRef::Instance("Article".into()));
/// ```
pub trait Resource {
    /// Type name used to derive the handler name.
    fn resource_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }
}

fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit(QUALIFIER).next().unwrap_or(base).to_string()
}

/// Reference to a resource, as accepted by grant and query operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum ResourceRef {
    /// Bare resource name, singular or plural (`article`, `admin/posts`).
    Name(String),
    /// Fully qualified handler name, used as-is.
    Handler(String),
    /// Runtime type name of a model instance (`Article`).
    Instance(String),
}

impl ResourceRef {
    /// Reference by bare name.
    pub fn name(name: impl Into<String>) -> Self {
        ResourceRef::Name(name.into())
    }

    /// Reference a handler type directly.
    pub fn handler<H: Handler>() -> Self {
        ResourceRef::Handler(H::NAME.to_string())
    }

    /// Reference a handler by its fully qualified name.
    pub fn handler_named(name: impl Into<String>) -> Self {
        ResourceRef::Handler(name.into())
    }

    /// Reference the resource a model instance belongs to.
    pub fn instance<R: Resource + ?Sized>(instance: &R) -> Self {
        ResourceRef::Instance(instance.resource_name())
    }

    /// Derive the fully qualified handler name.
    ///
    /// Handler references are returned as-is and ignore `namespace`. Names
    /// and instances are camelized, pluralized and suffixed, then prefixed
    /// with the camelized namespace segments.
    ///
    /// # Example
    ///
    /// ```
    /// use access_keeper::ResourceRef;
    ///
    /// let id = ResourceRef::name("post").derive(Some("admin"), "Controller").unwrap();
    /// assert_eq!(id.as_str(), "Admin::PostsController");
    /// ```
    pub fn derive(&self, namespace: Option<&str>, suffix: &str) -> AccessResult<ResourceId> {
        let base = match self {
            ResourceRef::Handler(name) => {
                return ResourceId::parse(name)
                    .map_err(|_| AccessError::MalformedResource(name.clone()));
            }
            ResourceRef::Name(name) | ResourceRef::Instance(name) => name,
        };

        let trimmed = base.trim();
        if !is_path_like(trimmed) {
            return Err(AccessError::MalformedResource(base.clone()));
        }
        let camelized = camelize(trimmed);
        if camelized.is_empty() {
            return Err(AccessError::MalformedResource(base.clone()));
        }

        let mut path = namespace_segments(namespace)?;
        path.push(format!("{}{}", pluralize(&camelized), suffix));

        ResourceId::parse(&path.join(QUALIFIER))
            .map_err(|_| AccessError::MalformedResource(base.clone()))
    }
}

impl From<&str> for ResourceRef {
    fn from(name: &str) -> Self {
        ResourceRef::Name(name.to_string())
    }
}

impl From<String> for ResourceRef {
    fn from(name: String) -> Self {
        ResourceRef::Name(name)
    }
}

impl From<&ResourceRef> for ResourceRef {
    fn from(resource: &ResourceRef) -> Self {
        resource.clone()
    }
}

impl From<ResourceId> for ResourceRef {
    fn from(id: ResourceId) -> Self {
        ResourceRef::Handler(id.0)
    }
}

impl From<&ResourceId> for ResourceRef {
    fn from(id: &ResourceId) -> Self {
        ResourceRef::Handler(id.0.clone())
    }
}

/// Split a namespace path on `::` and `/` and camelize each segment.
///
/// A missing or blank namespace yields no segments.
fn namespace_segments(namespace: Option<&str>) -> AccessResult<Vec<String>> {
    let Some(raw) = namespace.map(str::trim).filter(|ns| !ns.is_empty()) else {
        return Ok(Vec::new());
    };
    if !is_path_like(raw) {
        return Err(AccessError::MalformedNamespace(raw.to_string()));
    }
    Ok(split_path(raw).map(camelize).filter(|s| !s.is_empty()).collect())
}

fn is_path_like(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | ':'))
}
