//! # Scopes
//!
//! Core scope token and scope set types.
//! A scope is an atomic `<category>:<action>` permission token.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::category::ResourceCategory;

/// An atomic permission token in the form `<resource-category>:<action>`.
///
/// Scopes are opaque: nothing in the resolution path splits them apart except
/// [`Scope::category`], which is used to filter grants by resource category.
/// Ordering is lexicographic on the full token.
///
/// # Example
///
/// ```
/// use platform_scopes::{ResourceCategory, Scope};
///
/// let scope = Scope::new("workflow:read");
/// assert_eq!(scope.category(), "workflow");
/// assert_eq!(scope.resource_category(), Some(ResourceCategory::Workflow));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    /// Create a scope from its token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The category prefix: everything before the first `:`.
    ///
    /// A token without a separator is its own category.
    pub fn category(&self) -> &str {
        match self.0.split_once(':') {
            Some((category, _)) => category,
            None => &self.0,
        }
    }

    /// The category prefix as a known [`ResourceCategory`], if it is one.
    pub fn resource_category(&self) -> Option<ResourceCategory> {
        ResourceCategory::parse(self.category())
    }

    /// Check whether this scope's category is one of `categories`.
    pub fn belongs_to(&self, categories: &[ResourceCategory]) -> bool {
        let prefix = self.category();
        categories.iter().any(|c| c.as_str() == prefix)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scope {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Scope {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl AsRef<str> for Scope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A deduplicated, unordered collection of scopes.
///
/// Order is only imposed when the set leaves the resolver, through
/// [`ScopeSet::into_sorted_vec`].
///
/// # Example
///
/// ```
/// use platform_scopes::{Scope, ScopeSet};
///
/// let mut set = ScopeSet::new();
/// set.add(Scope::new("workflow:update"));
/// set.add(Scope::new("workflow:read"));
/// set.add(Scope::new("workflow:read"));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(
///     set.into_sorted_vec(),
///     vec![Scope::new("workflow:read"), Scope::new("workflow:update")]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet {
    scopes: HashSet<Scope>,
}

impl ScopeSet {
    /// Create a new empty scope set.
    pub fn new() -> Self {
        Self {
            scopes: HashSet::new(),
        }
    }

    /// Add a scope to the set.
    pub fn add(&mut self, scope: Scope) {
        self.scopes.insert(scope);
    }

    /// Add every scope in `scopes`.
    pub fn add_all<'a, I>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = &'a Scope>,
    {
        self.scopes.extend(scopes.into_iter().cloned());
    }

    /// Remove a scope, returning whether it was present.
    pub fn remove(&mut self, scope: &Scope) -> bool {
        self.scopes.remove(scope)
    }

    /// Check if the set contains `scope`.
    pub fn has(&self, scope: &Scope) -> bool {
        self.scopes.contains(scope)
    }

    /// Check if the set contains the scope with the given token.
    pub fn has_str(&self, token: &str) -> bool {
        self.scopes.iter().any(|s| s.as_str() == token)
    }

    /// Merge another scope set into this one.
    pub fn merge(&mut self, other: &ScopeSet) {
        self.add_all(other.iter());
    }

    /// Check if this set contains every scope of `other`.
    pub fn contains_all(&self, other: &ScopeSet) -> bool {
        other.scopes.is_subset(&self.scopes)
    }

    /// Iterate over the scopes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    /// Get the number of scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Consume the set into a lexicographically sorted vector.
    pub fn into_sorted_vec(self) -> Vec<Scope> {
        let mut scopes: Vec<Scope> = self.scopes.into_iter().collect();
        scopes.sort();
        scopes
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<T: IntoIterator<Item = Scope>>(iter: T) -> Self {
        Self {
            scopes: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a Scope> for ScopeSet {
    fn from_iter<T: IntoIterator<Item = &'a Scope>>(iter: T) -> Self {
        iter.into_iter().cloned().collect()
    }
}

impl Extend<Scope> for ScopeSet {
    fn extend<T: IntoIterator<Item = Scope>>(&mut self, iter: T) {
        self.scopes.extend(iter);
    }
}
