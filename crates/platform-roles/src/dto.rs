//! Role listing payloads
//!
//! `role` and `name` duplicate `slug` and `displayName` for older UI
//! clients. The duplication lives here only; [`Role`] does not carry it.

use serde::{Deserialize, Serialize};

use crate::registry::RoleRegistry;
use crate::role::Role;
use crate::slug::RoleType;

/// One role in a role listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    /// Same as `slug`
    pub role: String,

    /// Role slug
    pub slug: String,

    /// Human-readable name
    pub display_name: String,

    /// Same as `display_name`
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Built-in role
    pub system_role: bool,

    /// Role namespace
    pub role_type: RoleType,

    /// Available under the current license
    pub licensed: bool,

    /// Scope tokens
    pub scopes: Vec<String>,
}

impl RoleDto {
    /// Build the listing entry for `role`.
    pub fn from_role(role: &Role, licensed: bool) -> Self {
        Self {
            role: role.slug.to_string(),
            slug: role.slug.to_string(),
            display_name: role.display_name.clone(),
            name: role.display_name.clone(),
            description: role.description.clone(),
            system_role: role.system_role,
            role_type: role.role_type,
            licensed,
            scopes: role.scopes.iter().map(|scope| scope.to_string()).collect(),
        }
    }
}

/// Every role, grouped by namespace.
///
/// Serializes as `{ "global": [...], "project": [...], "credential": [...], "workflow": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalog {
    /// Global roles
    pub global: Vec<RoleDto>,

    /// Project roles
    pub project: Vec<RoleDto>,

    /// Credential sharing roles
    pub credential: Vec<RoleDto>,

    /// Workflow sharing roles
    pub workflow: Vec<RoleDto>,
}

impl RoleCatalog {
    /// Build a catalogue from the registry, computing `licensed` per role.
    pub fn from_registry<F>(registry: &RoleRegistry, licensed: F) -> Self
    where
        F: Fn(&Role) -> bool,
    {
        let mut catalog = Self::default();
        for role in registry.iter() {
            let dto = RoleDto::from_role(role, licensed(role));
            catalog.bucket_mut(role.role_type).push(dto);
        }
        catalog
    }

    /// Roles of one namespace.
    pub fn get(&self, role_type: RoleType) -> &[RoleDto] {
        match role_type {
            RoleType::Global => &self.global,
            RoleType::Project => &self.project,
            RoleType::Credential => &self.credential,
            RoleType::Workflow => &self.workflow,
        }
    }

    /// Find a role by slug.
    pub fn find(&self, slug: &str) -> Option<&RoleDto> {
        RoleType::all()
            .iter()
            .flat_map(|role_type| self.get(*role_type))
            .find(|dto| dto.slug == slug)
    }

    /// Total number of roles.
    pub fn len(&self) -> usize {
        self.global.len() + self.project.len() + self.credential.len() + self.workflow.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_mut(&mut self, role_type: RoleType) -> &mut Vec<RoleDto> {
        match role_type {
            RoleType::Global => &mut self.global,
            RoleType::Project => &mut self.project,
            RoleType::Credential => &mut self.credential,
            RoleType::Workflow => &mut self.workflow,
        }
    }
}
