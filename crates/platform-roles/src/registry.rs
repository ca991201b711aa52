//! Built-in role catalogue
//!
//! The registry is built once from static definitions and never mutated.
//! Every process builds the identical catalogue, so there is nothing to
//! coordinate across instances.

use platform_scopes::Scope;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::role::Role;
use crate::slug::{RoleType, SystemRole};

const WORKFLOW_SCOPES: &[&str] = &[
    "workflow:create",
    "workflow:read",
    "workflow:update",
    "workflow:delete",
    "workflow:list",
    "workflow:execute",
    "workflow:share",
    "workflow:move",
];

const CREDENTIAL_SCOPES: &[&str] = &[
    "credential:create",
    "credential:read",
    "credential:update",
    "credential:delete",
    "credential:list",
    "credential:share",
    "credential:move",
];

const PROJECT_SCOPES: &[&str] = &[
    "project:create",
    "project:read",
    "project:update",
    "project:delete",
    "project:list",
];

const USER_SCOPES: &[&str] = &[
    "user:create",
    "user:read",
    "user:update",
    "user:delete",
    "user:list",
    "user:resetPassword",
    "user:changeRole",
];

const TAG_SCOPES: &[&str] = &["tag:create", "tag:read", "tag:update", "tag:delete", "tag:list"];

const VARIABLE_SCOPES: &[&str] = &[
    "variable:create",
    "variable:read",
    "variable:update",
    "variable:delete",
    "variable:list",
];

const LICENSE_SCOPES: &[&str] = &["license:manage"];

const GLOBAL_MEMBER_SCOPES: &[&str] = &[
    "tag:create",
    "tag:read",
    "tag:update",
    "tag:list",
    "user:list",
    "variable:read",
    "variable:list",
];

const PROJECT_EDITOR_SCOPES: &[&str] = &[
    "workflow:create",
    "workflow:read",
    "workflow:update",
    "workflow:delete",
    "workflow:list",
    "workflow:execute",
    "credential:create",
    "credential:read",
    "credential:update",
    "credential:delete",
    "credential:list",
    "project:read",
    "project:list",
];

const PROJECT_VIEWER_SCOPES: &[&str] = &[
    "workflow:read",
    "workflow:list",
    "credential:read",
    "credential:list",
    "project:read",
    "project:list",
];

const PROJECT_MEMBER_SCOPES: &[&str] = &["project:read", "project:list"];

const PROJECT_MANAGE_SCOPES: &[&str] = &["project:update", "project:delete"];

const CREDENTIAL_OWNER_SCOPES: &[&str] = &[
    "credential:read",
    "credential:update",
    "credential:delete",
    "credential:share",
    "credential:move",
];

const CREDENTIAL_USER_SCOPES: &[&str] = &["credential:read"];

const WORKFLOW_OWNER_SCOPES: &[&str] = &[
    "workflow:read",
    "workflow:update",
    "workflow:delete",
    "workflow:execute",
    "workflow:share",
    "workflow:move",
];

const WORKFLOW_EDITOR_SCOPES: &[&str] = &["workflow:read", "workflow:update", "workflow:execute"];

const ALL_SCOPES: &[&[&str]] = &[
    WORKFLOW_SCOPES,
    CREDENTIAL_SCOPES,
    PROJECT_SCOPES,
    USER_SCOPES,
    TAG_SCOPES,
    VARIABLE_SCOPES,
    LICENSE_SCOPES,
];

const PERSONAL_OWNER_SCOPES: &[&[&str]] = &[WORKFLOW_SCOPES, CREDENTIAL_SCOPES, PROJECT_MEMBER_SCOPES];

fn collect(groups: &[&[&str]], except: &[&str]) -> Vec<Scope> {
    groups
        .iter()
        .flat_map(|group| group.iter())
        .filter(|token| !except.contains(*token))
        .map(|token| Scope::new(*token))
        .collect()
}

fn definition(role: SystemRole) -> Role {
    match role {
        SystemRole::GlobalOwner => Role::system(
            role,
            "Owner",
            "Built-in global role with owner permissions.",
            collect(ALL_SCOPES, &[]),
        ),
        SystemRole::GlobalAdmin => Role::system(
            role,
            "Admin",
            "Built-in global role with admin permissions.",
            collect(ALL_SCOPES, LICENSE_SCOPES),
        ),
        SystemRole::GlobalMember => Role::system(
            role,
            "Member",
            "Built-in global role with member permissions.",
            collect(&[GLOBAL_MEMBER_SCOPES], &[]),
        ),
        SystemRole::ProjectPersonalOwner => Role::system(
            role,
            "Project Owner",
            "Project Owner",
            collect(PERSONAL_OWNER_SCOPES, &[]),
        ),
        SystemRole::ProjectAdmin => Role::system(
            role,
            "Project Admin",
            "Project Admin",
            collect(
                &[WORKFLOW_SCOPES, CREDENTIAL_SCOPES, PROJECT_MEMBER_SCOPES, PROJECT_MANAGE_SCOPES],
                &[],
            ),
        ),
        SystemRole::ProjectEditor => Role::system(
            role,
            "Project Editor",
            "Project Editor",
            collect(&[PROJECT_EDITOR_SCOPES], &[]),
        ),
        SystemRole::ProjectViewer => Role::system(
            role,
            "Project Viewer",
            "Project Viewer",
            collect(&[PROJECT_VIEWER_SCOPES], &[]),
        ),
        SystemRole::CredentialOwner => Role::system(
            role,
            "Credential Owner",
            "Credential Owner",
            collect(&[CREDENTIAL_OWNER_SCOPES], &[]),
        ),
        SystemRole::CredentialUser => Role::system(
            role,
            "Credential User",
            "Credential User",
            collect(&[CREDENTIAL_USER_SCOPES], &[]),
        ),
        SystemRole::WorkflowOwner => Role::system(
            role,
            "Workflow Owner",
            "Workflow Owner",
            collect(&[WORKFLOW_OWNER_SCOPES], &[]),
        ),
        SystemRole::WorkflowEditor => Role::system(
            role,
            "Workflow Editor",
            "Workflow Editor",
            collect(&[WORKFLOW_EDITOR_SCOPES], &[]),
        ),
    }
}

/// Read-only catalogue of the built-in roles.
///
/// # Examples
///
/// ```
/// use platform_roles::RoleRegistry;
///
/// let registry = RoleRegistry::shared();
/// assert!(registry.role_scopes("workflow:editor").iter().any(|s| s.as_str() == "workflow:update"));
/// assert!(registry.role_scopes("bogus:role").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: BTreeMap<RoleType, Vec<Role>>,
    index: HashMap<&'static str, (RoleType, usize)>,
}

impl RoleRegistry {
    /// Build the catalogue from the static definitions.
    pub fn builtin() -> Self {
        let mut roles: BTreeMap<RoleType, Vec<Role>> =
            RoleType::all().iter().map(|role_type| (*role_type, Vec::new())).collect();
        let mut index = HashMap::new();

        for system_role in SystemRole::all() {
            let role_type = system_role.role_type();
            let bucket = roles.entry(role_type).or_default();
            index.insert(system_role.as_str(), (role_type, bucket.len()));
            bucket.push(definition(*system_role));
        }

        tracing::debug!(roles = index.len(), "Built-in role registry constructed");

        Self { roles, index }
    }

    /// The process-wide registry, built on first use.
    pub fn shared() -> &'static RoleRegistry {
        static REGISTRY: OnceLock<RoleRegistry> = OnceLock::new();
        REGISTRY.get_or_init(RoleRegistry::builtin)
    }

    /// Look up a built-in role by slug.
    pub fn role(&self, slug: &str) -> Option<&Role> {
        let (role_type, position) = self.index.get(slug)?;
        self.roles.get(role_type)?.get(*position)
    }

    /// The scopes a built-in role grants.
    ///
    /// Unknown slugs (stale share records, custom roles, foreign data) yield
    /// an empty slice rather than an error, so they grant nothing.
    pub fn role_scopes(&self, slug: &str) -> &[Scope] {
        match self.role(slug) {
            Some(role) => &role.scopes,
            None => {
                tracing::debug!(role = %slug, "Unknown role slug, granting no scopes");
                &[]
            }
        }
    }

    /// Built-in roles of one namespace, in catalogue order.
    pub fn roles_of(&self, role_type: RoleType) -> &[Role] {
        self.roles.get(&role_type).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All built-in roles keyed by namespace.
    pub fn all_roles(&self) -> &BTreeMap<RoleType, Vec<Role>> {
        &self.roles
    }

    /// Iterate over every built-in role.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.values().flatten()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::RoleSlug;

    #[test]
    fn test_registry_covers_all_namespaces() {
        let registry = RoleRegistry::builtin();
        let namespaces: Vec<RoleType> = registry.all_roles().keys().copied().collect();
        assert_eq!(
            namespaces,
            vec![RoleType::Global, RoleType::Project, RoleType::Workflow, RoleType::Credential]
        );
        assert_eq!(registry.roles_of(RoleType::Global).len(), 3);
        assert_eq!(registry.roles_of(RoleType::Project).len(), 4);
        assert_eq!(registry.roles_of(RoleType::Workflow).len(), 2);
        assert_eq!(registry.roles_of(RoleType::Credential).len(), 2);
    }

    #[test]
    fn test_every_role_is_in_its_own_namespace() {
        let registry = RoleRegistry::builtin();
        for (role_type, roles) in registry.all_roles() {
            for role in roles {
                assert_eq!(role.role_type, *role_type);
                assert!(role.system_role);
                assert!(matches!(role.slug, RoleSlug::System(_)));
            }
        }
    }

    #[test]
    fn test_unknown_role_has_no_scopes() {
        let registry = RoleRegistry::builtin();
        assert!(registry.role_scopes("bogus:role").is_empty());
        assert!(registry.role_scopes("").is_empty());
        assert!(registry.role("project:auditor").is_none());
    }

    #[test]
    fn test_owner_is_superset_of_every_global_role() {
        let registry = RoleRegistry::builtin();
        let owner = registry.role("global:owner").unwrap().scope_set();
        for role in registry.roles_of(RoleType::Global) {
            assert!(owner.contains_all(&role.scope_set()), "owner lacks scopes of {}", role.slug);
        }
    }

    #[test]
    fn test_sharing_roles_only_grant_their_own_category() {
        let registry = RoleRegistry::builtin();
        for role_type in [RoleType::Workflow, RoleType::Credential] {
            for role in registry.roles_of(role_type) {
                assert!(role.scopes.iter().all(|s| s.category() == role_type.as_str()));
            }
        }
    }

    #[test]
    fn test_workflow_editor_scopes() {
        let registry = RoleRegistry::builtin();
        let tokens: Vec<&str> = registry.role_scopes("workflow:editor").iter().map(Scope::as_str).collect();
        assert_eq!(tokens, vec!["workflow:read", "workflow:update", "workflow:execute"]);
    }

    #[test]
    fn test_project_roles_are_ordered_by_privilege() {
        let registry = RoleRegistry::builtin();
        let viewer = registry.role("project:viewer").unwrap().scope_set();
        let editor = registry.role("project:editor").unwrap().scope_set();
        let admin = registry.role("project:admin").unwrap().scope_set();

        assert!(editor.contains_all(&viewer));
        assert!(admin.contains_all(&editor));
        assert!(!viewer.contains_all(&editor));
    }

    #[test]
    fn test_shared_registry_is_a_singleton() {
        assert!(std::ptr::eq(RoleRegistry::shared(), RoleRegistry::shared()));
    }
}
