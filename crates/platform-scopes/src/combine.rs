//! # Scope Combination
//!
//! Merges named scope groups into one set, optionally masking some of the
//! groups by the union of a second set of groups.
//!
//! Which groups escape the mask is an explicit argument. The resolver passes
//! `bypass = [GLOBAL_GROUP]` so global-role grants survive any sharing mask,
//! while project-role grants are cut down to what the resource was shared for.

use std::collections::HashSet;

use crate::scope::{Scope, ScopeSet};

/// Group name for scopes granted by a principal's global role.
pub const GLOBAL_GROUP: &str = "global";

/// Group name for scopes granted by a principal's project role.
pub const PROJECT_GROUP: &str = "project";

/// Group name for scopes granted by a resource's sharing role.
pub const SHARING_GROUP: &str = "sharing";

/// A named group of scopes fed into [`combine_scopes`].
#[derive(Debug, Clone, Copy)]
pub struct ScopeGroup<'a> {
    /// Group name, matched against the bypass list.
    pub name: &'a str,
    /// Scopes in this group. Duplicates are allowed.
    pub scopes: &'a [Scope],
}

impl<'a> ScopeGroup<'a> {
    /// Create a named group.
    pub fn new(name: &'a str, scopes: &'a [Scope]) -> Self {
        Self { name, scopes }
    }
}

/// Combine scope groups into one deduplicated set.
///
/// - With no `masks`, the result is the union of every source group.
/// - Otherwise each source group named in `bypass` is included whole, and every
///   other source group contributes only the scopes that also appear in the
///   union of all `masks`.
///
/// # Example
///
/// ```
/// use platform_scopes::{combine_scopes, Scope, ScopeGroup, GLOBAL_GROUP, PROJECT_GROUP, SHARING_GROUP};
///
/// let global = vec![Scope::new("workflow:execute")];
/// let project = vec![Scope::new("workflow:read"), Scope::new("workflow:delete")];
/// let sharing = vec![Scope::new("workflow:read")];
///
/// let merged = combine_scopes(
///     &[ScopeGroup::new(GLOBAL_GROUP, &global), ScopeGroup::new(PROJECT_GROUP, &project)],
///     &[ScopeGroup::new(SHARING_GROUP, &sharing)],
///     &[GLOBAL_GROUP],
/// );
///
/// assert_eq!(
///     merged.into_sorted_vec(),
///     vec![Scope::new("workflow:execute"), Scope::new("workflow:read")]
/// );
/// ```
pub fn combine_scopes(sources: &[ScopeGroup<'_>], masks: &[ScopeGroup<'_>], bypass: &[&str]) -> ScopeSet {
    if masks.is_empty() {
        return sources.iter().flat_map(|group| group.scopes.iter()).collect();
    }

    let mask_union: HashSet<&Scope> = masks.iter().flat_map(|group| group.scopes.iter()).collect();

    let mut combined = ScopeSet::new();
    for group in sources {
        if bypass.iter().any(|name| *name == group.name) {
            combined.add_all(group.scopes);
        } else {
            combined.add_all(group.scopes.iter().filter(|scope| mask_union.contains(scope)));
        }
    }
    combined
}
