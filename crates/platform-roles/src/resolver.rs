//! Effective scope resolution
//!
//! For one principal and one resource:
//!
//! ```text
//! effective = global ∪ ⋃ over shares (project(share) ∩ sharing_mask(share))
//! ```
//!
//! Global grants bypass every sharing mask; project grants never exceed what
//! the resource was shared for.

use platform_scopes::{
    combine_scopes, ResourceCategory, Scope, ScopeGroup, ScopeSet, GLOBAL_GROUP, PROJECT_GROUP, SHARING_GROUP,
};

use crate::principal::{ProjectRelation, Share, User};
use crate::registry::RoleRegistry;

/// Resolves a principal's scopes over shared resources.
///
/// # Examples
///
/// ```
/// use platform_roles::{GlobalRole, ProjectRelation, RoleRegistry, ScopeResolver, Share, SystemRole, User};
/// use platform_scopes::ResourceCategory;
///
/// let registry = RoleRegistry::shared();
/// let resolver = ScopeResolver::new(registry);
///
/// let user = User::new("u1", GlobalRole::Member);
/// let viewer = registry.role("project:viewer").unwrap().clone();
/// let relations = vec![ProjectRelation::new("p1", viewer)];
/// let shares = vec![Share::new("p1", SystemRole::WorkflowOwner)];
///
/// let scopes = resolver.effective_scopes(ResourceCategory::Workflow, &user, &shares, &relations);
/// let tokens: Vec<&str> = scopes.iter().map(|s| s.as_str()).collect();
/// assert_eq!(tokens, ["workflow:read"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScopeResolver<'r> {
    registry: &'r RoleRegistry,
}

impl<'r> ScopeResolver<'r> {
    /// Creates a resolver over a registry.
    pub fn new(registry: &'r RoleRegistry) -> Self {
        Self { registry }
    }

    /// The registry this resolver reads.
    pub fn registry(&self) -> &'r RoleRegistry {
        self.registry
    }

    /// The principal's global-role scopes restricted to `categories`.
    pub fn principal_global_scopes(&self, principal: &User, categories: &[ResourceCategory]) -> Vec<Scope> {
        self.registry
            .role_scopes(principal.global_role.as_str())
            .iter()
            .filter(|scope| scope.belongs_to(categories))
            .cloned()
            .collect()
    }

    /// The sorted, deduplicated scopes `principal` holds over a resource of
    /// `category` carrying `shares`.
    ///
    /// A share whose project has no matching relation contributes nothing
    /// beyond the global scopes.
    pub fn effective_scopes(
        &self,
        category: ResourceCategory,
        principal: &User,
        shares: &[Share],
        relations: &[ProjectRelation],
    ) -> Vec<Scope> {
        let global_scopes = self.principal_global_scopes(principal, &[category]);
        let mut effective: ScopeSet = global_scopes.iter().collect();

        for share in shares {
            let project_scopes = relations
                .iter()
                .find(|relation| relation.project_id == share.project_id)
                .map(|relation| relation.role.scopes.as_slice())
                .unwrap_or(&[]);
            let resource_mask = self.registry.role_scopes(share.role.as_str());

            let merged = combine_scopes(
                &[
                    ScopeGroup::new(GLOBAL_GROUP, &global_scopes),
                    ScopeGroup::new(PROJECT_GROUP, project_scopes),
                ],
                &[ScopeGroup::new(SHARING_GROUP, resource_mask)],
                &[GLOBAL_GROUP],
            );
            effective.merge(&merged);
        }

        tracing::debug!(
            user = %principal.id,
            category = %category,
            shares = shares.len(),
            scopes = effective.len(),
            "Resolved effective scopes"
        );

        effective.into_sorted_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::GlobalRole;
    use crate::role::Role;
    use crate::slug::{CustomRoleSlug, RoleSlug, SystemRole};

    fn custom_role(tokens: &[&str]) -> Role {
        let slug = CustomRoleSlug::parse("project:custom").unwrap();
        Role::custom(slug, "Custom", tokens.iter().copied().map(Scope::from))
    }

    fn tokens(scopes: &[Scope]) -> Vec<&str> {
        scopes.iter().map(Scope::as_str).collect()
    }

    #[test]
    fn test_global_scopes_filtered_by_category() {
        let registry = RoleRegistry::builtin();
        let resolver = ScopeResolver::new(&registry);
        let owner = User::new("u1", GlobalRole::Owner);

        let scopes = resolver.principal_global_scopes(&owner, &[ResourceCategory::Credential]);
        assert!(!scopes.is_empty());
        assert!(scopes.iter().all(|s| s.category() == "credential"));

        let both = resolver
            .principal_global_scopes(&owner, &[ResourceCategory::Credential, ResourceCategory::Workflow]);
        assert!(both.iter().any(|s| s.category() == "workflow"));
        assert_eq!(both.len(), 15);
    }

    #[test]
    fn test_member_has_no_global_workflow_scopes() {
        let registry = RoleRegistry::builtin();
        let resolver = ScopeResolver::new(&registry);
        let member = User::new("u1", GlobalRole::Member);

        assert!(resolver
            .principal_global_scopes(&member, &[ResourceCategory::Workflow])
            .is_empty());
    }

    #[test]
    fn test_project_scopes_masked_by_sharing_role() {
        let registry = RoleRegistry::builtin();
        let resolver = ScopeResolver::new(&registry);
        let member = User::new("u1", GlobalRole::Member);
        let relations = vec![ProjectRelation::new(
            "p1",
            custom_role(&["workflow:read", "workflow:update", "workflow:delete", "workflow:share"]),
        )];
        let shares = vec![Share::new("p1", SystemRole::WorkflowEditor)];

        let scopes = resolver.effective_scopes(ResourceCategory::Workflow, &member, &shares, &relations);
        assert_eq!(tokens(&scopes), vec!["workflow:read", "workflow:update"]);
    }

    #[test]
    fn test_share_without_relation_contributes_nothing() {
        let registry = RoleRegistry::builtin();
        let resolver = ScopeResolver::new(&registry);
        let member = User::new("u1", GlobalRole::Member);
        let relations = vec![ProjectRelation::new("p1", custom_role(&["workflow:read"]))];
        let shares = vec![Share::new("p2", SystemRole::WorkflowOwner)];

        let scopes = resolver.effective_scopes(ResourceCategory::Workflow, &member, &shares, &relations);
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_unknown_sharing_role_grants_no_project_scopes() {
        let registry = RoleRegistry::builtin();
        let resolver = ScopeResolver::new(&registry);
        let member = User::new("u1", GlobalRole::Member);
        let relations = vec![ProjectRelation::new("p1", custom_role(&["workflow:read"]))];
        let shares = vec![Share::new("p1", RoleSlug::parse("workflow:legacy").unwrap())];

        let scopes = resolver.effective_scopes(ResourceCategory::Workflow, &member, &shares, &relations);
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_owner_keeps_global_scopes_without_shares() {
        let registry = RoleRegistry::builtin();
        let resolver = ScopeResolver::new(&registry);
        let owner = User::new("u1", GlobalRole::Owner);

        let scopes = resolver.effective_scopes(ResourceCategory::Workflow, &owner, &[], &[]);
        assert_eq!(
            tokens(&scopes),
            vec![
                "workflow:create",
                "workflow:delete",
                "workflow:execute",
                "workflow:list",
                "workflow:move",
                "workflow:read",
                "workflow:share",
                "workflow:update",
            ]
        );
    }
}
