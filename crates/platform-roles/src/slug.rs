//! Role slugs and role namespaces
//!
//! Every role is identified by a slug of the form `<namespace>:<name>`.
//! Built-in slugs form a closed enum so that every `match` over them stays
//! exhaustive; user-defined project roles carry a validated free-form slug.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{ScopeError, ScopeResult};

/// The four role namespaces.
///
/// # Examples
///
/// ```
/// use platform_roles::RoleType;
///
/// assert_eq!(RoleType::parse("credential"), Some(RoleType::Credential));
/// assert_eq!(RoleType::Workflow.as_str(), "workflow");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    /// Roles bound directly to a user, valid everywhere.
    Global,
    /// Roles bound to a user within one project.
    Project,
    /// Roles binding a workflow to a project.
    Workflow,
    /// Roles binding a credential to a project.
    Credential,
}

impl RoleType {
    /// Get string representation of the namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Project => "project",
            Self::Workflow => "workflow",
            Self::Credential => "credential",
        }
    }

    /// Parse a namespace from its string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "global" => Some(Self::Global),
            "project" => Some(Self::Project),
            "workflow" => Some(Self::Workflow),
            "credential" => Some(Self::Credential),
            _ => None,
        }
    }

    /// All namespaces.
    pub fn all() -> &'static [RoleType] {
        &[Self::Global, Self::Project, Self::Workflow, Self::Credential]
    }
}

/// Built-in role slugs.
///
/// # Examples
///
/// ```
/// use platform_roles::{RoleType, SystemRole};
///
/// let role = SystemRole::parse("workflow:editor").unwrap();
/// assert_eq!(role, SystemRole::WorkflowEditor);
/// assert_eq!(role.role_type(), RoleType::Workflow);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SystemRole {
    /// Instance owner. Never assignable.
    #[serde(rename = "global:owner")]
    GlobalOwner,
    /// Instance administrator.
    #[serde(rename = "global:admin")]
    GlobalAdmin,
    /// Regular instance member.
    #[serde(rename = "global:member")]
    GlobalMember,
    /// Owner of a personal project.
    #[serde(rename = "project:personalOwner")]
    ProjectPersonalOwner,
    /// Team project administrator.
    #[serde(rename = "project:admin")]
    ProjectAdmin,
    /// Team project editor.
    #[serde(rename = "project:editor")]
    ProjectEditor,
    /// Team project viewer.
    #[serde(rename = "project:viewer")]
    ProjectViewer,
    /// Project owning a credential.
    #[serde(rename = "credential:owner")]
    CredentialOwner,
    /// Project a credential is shared with for use only.
    #[serde(rename = "credential:user")]
    CredentialUser,
    /// Project owning a workflow.
    #[serde(rename = "workflow:owner")]
    WorkflowOwner,
    /// Project a workflow is shared with for editing.
    #[serde(rename = "workflow:editor")]
    WorkflowEditor,
}

impl SystemRole {
    /// Get the slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GlobalOwner => "global:owner",
            Self::GlobalAdmin => "global:admin",
            Self::GlobalMember => "global:member",
            Self::ProjectPersonalOwner => "project:personalOwner",
            Self::ProjectAdmin => "project:admin",
            Self::ProjectEditor => "project:editor",
            Self::ProjectViewer => "project:viewer",
            Self::CredentialOwner => "credential:owner",
            Self::CredentialUser => "credential:user",
            Self::WorkflowOwner => "workflow:owner",
            Self::WorkflowEditor => "workflow:editor",
        }
    }

    /// Parse a built-in slug. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|role| role.as_str() == s)
    }

    /// The namespace this role belongs to.
    pub fn role_type(&self) -> RoleType {
        match self {
            Self::GlobalOwner | Self::GlobalAdmin | Self::GlobalMember => RoleType::Global,
            Self::ProjectPersonalOwner | Self::ProjectAdmin | Self::ProjectEditor | Self::ProjectViewer => {
                RoleType::Project
            }
            Self::CredentialOwner | Self::CredentialUser => RoleType::Credential,
            Self::WorkflowOwner | Self::WorkflowEditor => RoleType::Workflow,
        }
    }

    /// Whether this is a team project role a user can be assigned to.
    ///
    /// `project:personalOwner` exists only on personal projects and is never
    /// assigned.
    pub fn is_assignable_project_role(&self) -> bool {
        matches!(self, Self::ProjectAdmin | Self::ProjectEditor | Self::ProjectViewer)
    }

    /// All built-in roles in catalogue order.
    pub fn all() -> &'static [SystemRole] {
        &[
            Self::GlobalOwner,
            Self::GlobalAdmin,
            Self::GlobalMember,
            Self::ProjectPersonalOwner,
            Self::ProjectAdmin,
            Self::ProjectEditor,
            Self::ProjectViewer,
            Self::CredentialOwner,
            Self::CredentialUser,
            Self::WorkflowOwner,
            Self::WorkflowEditor,
        ]
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slug of a user-defined project role.
///
/// Any non-empty string is accepted except the built-in slugs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomRoleSlug(String);

impl CustomRoleSlug {
    /// Validate a custom role slug.
    ///
    /// # Examples
    ///
    /// ```
    /// use platform_roles::CustomRoleSlug;
    ///
    /// assert!(CustomRoleSlug::parse("project:auditor").is_ok());
    /// assert!(CustomRoleSlug::parse("project:personalOwner").is_err());
    /// assert!(CustomRoleSlug::parse("").is_err());
    /// ```
    pub fn parse(s: impl Into<String>) -> ScopeResult<Self> {
        let slug = s.into();
        if slug.is_empty() || SystemRole::parse(&slug).is_some() {
            return Err(ScopeError::InvalidRoleSlug(slug));
        }
        Ok(Self(slug))
    }

    /// Get the slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A role slug: built-in, user-defined, or unrecognized.
///
/// # Examples
///
/// ```
/// use platform_roles::{RoleSlug, SystemRole};
///
/// let slug: RoleSlug = "project:admin".parse().unwrap();
/// assert_eq!(slug, RoleSlug::System(SystemRole::ProjectAdmin));
///
/// let custom: RoleSlug = "project:auditor".parse().unwrap();
/// assert!(!custom.is_system());
///
/// let stale = RoleSlug::from_stored("");
/// assert_eq!(stale, RoleSlug::Unknown(String::new()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleSlug {
    /// One of the built-in roles.
    System(SystemRole),
    /// A user-defined role.
    Custom(CustomRoleSlug),
    /// A stored slug that is neither built-in nor a valid custom slug.
    ///
    /// Grants no scopes.
    Unknown(String),
}

impl RoleSlug {
    /// Parse a slug, preferring built-in roles.
    pub fn parse(s: &str) -> ScopeResult<Self> {
        match SystemRole::parse(s) {
            Some(role) => Ok(Self::System(role)),
            None => CustomRoleSlug::parse(s).map(Self::Custom),
        }
    }

    /// Read a slug from stored data without rejecting it.
    ///
    /// Slugs that fail [`RoleSlug::parse`] become [`RoleSlug::Unknown`].
    pub fn from_stored(s: &str) -> Self {
        match Self::parse(s) {
            Ok(slug) => slug,
            Err(e) => {
                tracing::debug!(role = %s, error = %e, "Unrecognized stored role slug");
                Self::Unknown(s.to_string())
            }
        }
    }

    /// Get the slug.
    pub fn as_str(&self) -> &str {
        match self {
            Self::System(role) => role.as_str(),
            Self::Custom(slug) => slug.as_str(),
            Self::Unknown(slug) => slug.as_str(),
        }
    }

    /// Whether this is a built-in role.
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System(_))
    }
}

impl From<SystemRole> for RoleSlug {
    fn from(role: SystemRole) -> Self {
        Self::System(role)
    }
}

impl From<CustomRoleSlug> for RoleSlug {
    fn from(slug: CustomRoleSlug) -> Self {
        Self::Custom(slug)
    }
}

impl FromStr for RoleSlug {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RoleSlug {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoleSlug {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slug = String::deserialize(deserializer)?;
        Ok(Self::from_stored(&slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_role_round_trip() {
        for role in SystemRole::all() {
            assert_eq!(SystemRole::parse(role.as_str()), Some(*role));
        }
        assert_eq!(SystemRole::parse("Project:Admin"), None);
    }

    #[test]
    fn test_slugs_are_unique_across_namespaces() {
        let mut slugs: Vec<&str> = SystemRole::all().iter().map(|r| r.as_str()).collect();
        let total = slugs.len();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), total);
    }

    #[test]
    fn test_slug_prefix_matches_namespace() {
        for role in SystemRole::all() {
            let prefix = role.as_str().split(':').next().unwrap();
            assert_eq!(RoleType::parse(prefix), Some(role.role_type()));
        }
    }

    #[test]
    fn test_assignable_project_roles() {
        assert!(SystemRole::ProjectAdmin.is_assignable_project_role());
        assert!(SystemRole::ProjectViewer.is_assignable_project_role());
        assert!(!SystemRole::ProjectPersonalOwner.is_assignable_project_role());
        assert!(!SystemRole::GlobalAdmin.is_assignable_project_role());
    }

    #[test]
    fn test_custom_slug_rejects_reserved_values() {
        for reserved in ["project:personalOwner", "project:admin", "project:editor", "project:viewer"] {
            assert_eq!(
                CustomRoleSlug::parse(reserved),
                Err(ScopeError::InvalidRoleSlug(reserved.to_string()))
            );
        }
        assert!(CustomRoleSlug::parse("").is_err());
        assert!(CustomRoleSlug::parse("project:releaseManager").is_ok());
    }

    #[test]
    fn test_role_slug_prefers_system_roles() {
        assert_eq!(
            RoleSlug::parse("credential:user"),
            Ok(RoleSlug::System(SystemRole::CredentialUser))
        );
        let custom = RoleSlug::parse("bogus:role").unwrap();
        assert_eq!(custom.as_str(), "bogus:role");
        assert!(!custom.is_system());
    }

    #[test]
    fn test_role_slug_serde() {
        let slug = RoleSlug::System(SystemRole::WorkflowOwner);
        assert_eq!(serde_json::to_string(&slug).unwrap(), r#""workflow:owner""#);

        let parsed: RoleSlug = serde_json::from_str(r#""project:qa""#).unwrap();
        assert_eq!(parsed.as_str(), "project:qa");

        let empty: RoleSlug = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(empty, RoleSlug::Unknown(String::new()));
    }

    #[test]
    fn test_stored_slug_never_fails() {
        assert_eq!(
            RoleSlug::from_stored("workflow:owner"),
            RoleSlug::System(SystemRole::WorkflowOwner)
        );
        assert_eq!(RoleSlug::from_stored("project:qa").as_str(), "project:qa");
        assert!(matches!(RoleSlug::from_stored("project:qa"), RoleSlug::Custom(_)));

        let unknown = RoleSlug::from_stored("");
        assert_eq!(unknown, RoleSlug::Unknown(String::new()));
        assert!(!unknown.is_system());
        assert_eq!(RoleSlug::parse(""), Err(ScopeError::InvalidRoleSlug(String::new())));
    }

    #[test]
    fn test_system_role_serde_matches_slug() {
        for role in SystemRole::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }
}
