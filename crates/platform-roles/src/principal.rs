//! Principals and the relations scope resolution reads
//!
//! These are read-only inputs supplied by the persistence layer for the
//! duration of one resolution call.

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::slug::{RoleSlug, SystemRole};

/// The global role held by a user.
///
/// # Examples
///
/// ```
/// use platform_roles::GlobalRole;
///
/// assert_eq!(GlobalRole::parse("global:admin"), Some(GlobalRole::Admin));
/// assert!(!GlobalRole::Owner.is_assignable());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GlobalRole {
    /// Instance owner
    #[serde(rename = "global:owner")]
    Owner,

    /// Instance administrator
    #[serde(rename = "global:admin")]
    Admin,

    /// Regular member
    #[serde(rename = "global:member")]
    Member,
}

impl GlobalRole {
    /// The built-in role backing this global role.
    pub fn system_role(&self) -> SystemRole {
        match self {
            Self::Owner => SystemRole::GlobalOwner,
            Self::Admin => SystemRole::GlobalAdmin,
            Self::Member => SystemRole::GlobalMember,
        }
    }

    /// Get the slug.
    pub fn as_str(&self) -> &'static str {
        self.system_role().as_str()
    }

    /// Parse a global role slug.
    pub fn parse(s: &str) -> Option<Self> {
        match SystemRole::parse(s)? {
            SystemRole::GlobalOwner => Some(Self::Owner),
            SystemRole::GlobalAdmin => Some(Self::Admin),
            SystemRole::GlobalMember => Some(Self::Member),
            _ => None,
        }
    }

    /// Whether the role can be assigned to a user.
    ///
    /// The owner role is fixed at setup and cannot be changed.
    pub fn is_assignable(&self) -> bool {
        !matches!(self, Self::Owner)
    }
}

impl Default for GlobalRole {
    fn default() -> Self {
        Self::Member
    }
}

/// A user requesting access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID
    pub id: String,

    /// The user's single global role
    pub global_role: GlobalRole,
}

impl User {
    /// Creates a user with the given global role.
    pub fn new(id: impl Into<String>, global_role: GlobalRole) -> Self {
        Self {
            id: id.into(),
            global_role,
        }
    }
}

/// Binds a user to a project role within one project.
///
/// The role is carried in full because project roles may be custom, in which
/// case the registry does not know their scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRelation {
    /// Project ID
    pub project_id: String,

    /// Role within the project
    pub role: Role,
}

impl ProjectRelation {
    /// Creates a project relation.
    pub fn new(project_id: impl Into<String>, role: Role) -> Self {
        Self {
            project_id: project_id.into(),
            role,
        }
    }
}

/// Binds a workflow or credential to a project through a sharing role.
///
/// # Examples
///
/// ```
/// use platform_roles::{Share, SystemRole};
///
/// let share = Share::new("project-1", SystemRole::WorkflowEditor);
/// assert_eq!(share.role.as_str(), "workflow:editor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Project the resource is shared with
    pub project_id: String,

    /// Sharing role slug
    pub role: RoleSlug,
}

impl Share {
    /// Creates a share.
    pub fn new(project_id: impl Into<String>, role: impl Into<RoleSlug>) -> Self {
        Self {
            project_id: project_id.into(),
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_role_slugs() {
        assert_eq!(GlobalRole::Owner.as_str(), "global:owner");
        assert_eq!(GlobalRole::Member.as_str(), "global:member");
        assert_eq!(GlobalRole::parse("project:admin"), None);
        assert_eq!(GlobalRole::parse("bogus"), None);
    }

    #[test]
    fn test_only_owner_is_unassignable() {
        assert!(!GlobalRole::Owner.is_assignable());
        assert!(GlobalRole::Admin.is_assignable());
        assert!(GlobalRole::Member.is_assignable());
    }

    #[test]
    fn test_share_deserializes_from_camel_case() {
        let share: Share = serde_json::from_str(r#"{"projectId":"p1","role":"credential:user"}"#).unwrap();
        assert_eq!(share, Share::new("p1", SystemRole::CredentialUser));
    }

    #[test]
    fn test_user_serializes_global_role_slug() {
        let user = User::new("u1", GlobalRole::Admin);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["globalRole"], "global:admin");
    }
}
