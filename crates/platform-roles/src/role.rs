//! Role definitions
//!
//! A role names a set of scopes within one namespace. Built-in roles are
//! created by the [`RoleRegistry`](crate::RoleRegistry); custom project roles
//! are loaded by the caller and passed in through project relations.

use platform_scopes::{Scope, ScopeSet};
use serde::{Deserialize, Serialize};

use crate::slug::{CustomRoleSlug, RoleSlug, RoleType, SystemRole};

/// A role and the scopes it grants.
///
/// Whether a role is licensed is not part of the role: it depends on the
/// license state at request time and is computed by the
/// [`LicenseGate`](crate::LicenseGate).
///
/// # Examples
///
/// ```
/// use platform_roles::{CustomRoleSlug, Role, RoleType};
/// use platform_scopes::Scope;
///
/// let slug = CustomRoleSlug::parse("project:runner").unwrap();
/// let role = Role::custom(slug, "Runner", [Scope::new("workflow:execute"), Scope::new("workflow:read")]);
///
/// assert_eq!(role.role_type, RoleType::Project);
/// assert!(!role.system_role);
/// assert!(role.has_scope("workflow:execute"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique slug across all namespaces
    pub slug: RoleSlug,

    /// Human-readable name
    pub display_name: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Namespace of the role
    pub role_type: RoleType,

    /// Built-in and immutable
    pub system_role: bool,

    /// Scopes granted, without duplicates
    pub scopes: Vec<Scope>,
}

impl Role {
    /// Creates a built-in role.
    ///
    /// Scope order is kept as given; repeated tokens are dropped.
    pub(crate) fn system(
        role: SystemRole,
        display_name: impl Into<String>,
        description: impl Into<String>,
        scopes: Vec<Scope>,
    ) -> Self {
        let mut seen = ScopeSet::new();
        let scopes = scopes
            .into_iter()
            .filter(|scope| {
                let fresh = !seen.has(scope);
                seen.add(scope.clone());
                fresh
            })
            .collect();

        Self {
            slug: RoleSlug::System(role),
            display_name: display_name.into(),
            description: Some(description.into()),
            role_type: role.role_type(),
            system_role: true,
            scopes,
        }
    }

    /// Creates a custom project role.
    ///
    /// Scopes are deduplicated and sorted.
    pub fn custom(
        slug: CustomRoleSlug,
        display_name: impl Into<String>,
        scopes: impl IntoIterator<Item = Scope>,
    ) -> Self {
        Self {
            slug: RoleSlug::Custom(slug),
            display_name: display_name.into(),
            description: None,
            role_type: RoleType::Project,
            system_role: false,
            scopes: scopes.into_iter().collect::<ScopeSet>().into_sorted_vec(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check whether the role grants the scope with the given token.
    pub fn has_scope(&self, token: &str) -> bool {
        self.scopes.iter().any(|scope| scope.as_str() == token)
    }

    /// The scopes as a set.
    pub fn scope_set(&self) -> ScopeSet {
        self.scopes.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_role_drops_repeated_scopes_but_keeps_order() {
        let role = Role::system(
            SystemRole::WorkflowEditor,
            "Workflow Editor",
            "Workflow Editor",
            vec![
                Scope::new("workflow:update"),
                Scope::new("workflow:read"),
                Scope::new("workflow:update"),
            ],
        );

        assert_eq!(role.scopes, vec![Scope::new("workflow:update"), Scope::new("workflow:read")]);
        assert_eq!(role.role_type, RoleType::Workflow);
        assert!(role.system_role);
    }

    #[test]
    fn test_custom_role_scopes_are_sorted() {
        let slug = CustomRoleSlug::parse("project:ops").unwrap();
        let role = Role::custom(
            slug,
            "Ops",
            [Scope::new("workflow:execute"), Scope::new("credential:read"), Scope::new("workflow:execute")],
        )
        .with_description("Runs production workflows");

        assert_eq!(role.scopes, vec![Scope::new("credential:read"), Scope::new("workflow:execute")]);
        assert_eq!(role.description.as_deref(), Some("Runs production workflows"));
    }

    #[test]
    fn test_role_serializes_camel_case() {
        let slug = CustomRoleSlug::parse("project:ops").unwrap();
        let role = Role::custom(slug, "Ops", [Scope::new("workflow:read")]);
        let json = serde_json::to_value(&role).unwrap();

        assert_eq!(json["slug"], "project:ops");
        assert_eq!(json["displayName"], "Ops");
        assert_eq!(json["roleType"], "project");
        assert_eq!(json["systemRole"], false);
        assert_eq!(json["scopes"], serde_json::json!(["workflow:read"]));
    }
}
