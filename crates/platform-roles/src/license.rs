//! Role licensing
//!
//! Some roles are only available on higher license tiers. The gate answers
//! "is this role licensed right now" for role listings; it never writes the
//! answer back onto the registry's roles.

use serde::{Deserialize, Serialize};

use crate::dto::RoleCatalog;
use crate::registry::RoleRegistry;
use crate::slug::{RoleSlug, SystemRole};

/// License checks the gate depends on.
///
/// Implemented by whatever holds the current license state.
pub trait LicenseState {
    /// Whether the project admin role is licensed.
    fn is_project_role_admin_licensed(&self) -> bool;

    /// Whether the project editor role is licensed.
    fn is_project_role_editor_licensed(&self) -> bool;

    /// Whether the project viewer role is licensed.
    fn is_project_role_viewer_licensed(&self) -> bool;

    /// Whether advanced permissions (the global admin role) are licensed.
    fn is_advanced_permissions_licensed(&self) -> bool;
}

/// A fixed license state.
///
/// # Examples
///
/// ```
/// use platform_roles::{LicenseFlags, LicenseState, LicenseTier};
///
/// let flags = LicenseTier::Pro.flags();
/// assert!(flags.is_project_role_admin_licensed());
/// assert!(!flags.is_project_role_viewer_licensed());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseFlags {
    /// Project admin role licensed
    pub project_role_admin: bool,

    /// Project editor role licensed
    pub project_role_editor: bool,

    /// Project viewer role licensed
    pub project_role_viewer: bool,

    /// Advanced permissions licensed
    pub advanced_permissions: bool,
}

impl LicenseState for LicenseFlags {
    fn is_project_role_admin_licensed(&self) -> bool {
        self.project_role_admin
    }

    fn is_project_role_editor_licensed(&self) -> bool {
        self.project_role_editor
    }

    fn is_project_role_viewer_licensed(&self) -> bool {
        self.project_role_viewer
    }

    fn is_advanced_permissions_licensed(&self) -> bool {
        self.advanced_permissions
    }
}

/// License tier of an instance.
///
/// # Tier Hierarchy
///
/// - **Community**: no gated roles
/// - **Pro**: project admins
/// - **Business**: project admins and editors, global admins
/// - **Enterprise**: every gated role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LicenseTier {
    /// Unlicensed community edition
    Community,

    /// Pro plan
    Pro,

    /// Business plan
    Business,

    /// Enterprise plan
    Enterprise,
}

impl LicenseTier {
    /// Get the license flags granted by this tier.
    pub fn flags(&self) -> LicenseFlags {
        match self {
            LicenseTier::Community => LicenseFlags::default(),
            LicenseTier::Pro => LicenseFlags {
                project_role_admin: true,
                ..LicenseFlags::default()
            },
            LicenseTier::Business => LicenseFlags {
                project_role_admin: true,
                project_role_editor: true,
                project_role_viewer: false,
                advanced_permissions: true,
            },
            LicenseTier::Enterprise => LicenseFlags {
                project_role_admin: true,
                project_role_editor: true,
                project_role_viewer: true,
                advanced_permissions: true,
            },
        }
    }

    /// Parse tier from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(LicenseTier)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "community" | "ce" | "free" => Some(LicenseTier::Community),
            "pro" | "starter" => Some(LicenseTier::Pro),
            "business" | "team" => Some(LicenseTier::Business),
            "enterprise" | "ee" => Some(LicenseTier::Enterprise),
            _ => None,
        }
    }

    /// Get string representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseTier::Community => "community",
            LicenseTier::Pro => "pro",
            LicenseTier::Business => "business",
            LicenseTier::Enterprise => "enterprise",
        }
    }

    /// Get a human-readable display name for the tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            LicenseTier::Community => "Community",
            LicenseTier::Pro => "Pro",
            LicenseTier::Business => "Business",
            LicenseTier::Enterprise => "Enterprise",
        }
    }

    /// Check if this is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, LicenseTier::Community)
    }
}

impl Default for LicenseTier {
    fn default() -> Self {
        LicenseTier::Community
    }
}

/// Decides which roles are licensed under a license state.
///
/// # Examples
///
/// ```
/// use platform_roles::{LicenseGate, LicenseTier, RoleRegistry, RoleSlug, SystemRole};
///
/// let license = LicenseTier::Community.flags();
/// let gate = LicenseGate::new(RoleRegistry::shared(), &license);
///
/// assert!(!gate.is_licensed(&RoleSlug::System(SystemRole::ProjectAdmin)));
/// assert!(gate.is_licensed(&RoleSlug::System(SystemRole::GlobalOwner)));
/// ```
#[derive(Debug)]
pub struct LicenseGate<'a, L: LicenseState + ?Sized> {
    registry: &'a RoleRegistry,
    license: &'a L,
}

impl<'a, L: LicenseState + ?Sized> LicenseGate<'a, L> {
    /// Creates a gate over a registry and a license state.
    pub fn new(registry: &'a RoleRegistry, license: &'a L) -> Self {
        Self { registry, license }
    }

    /// Whether `role` is available under the current license.
    pub fn is_licensed(&self, role: &RoleSlug) -> bool {
        match role {
            RoleSlug::System(system_role) => self.is_system_role_licensed(*system_role),
            // TODO: license custom project roles once custom role storage exposes a tier requirement.
            RoleSlug::Custom(_) | RoleSlug::Unknown(_) => true,
        }
    }

    fn is_system_role_licensed(&self, role: SystemRole) -> bool {
        match role {
            SystemRole::ProjectAdmin => self.license.is_project_role_admin_licensed(),
            SystemRole::ProjectEditor => self.license.is_project_role_editor_licensed(),
            SystemRole::ProjectViewer => self.license.is_project_role_viewer_licensed(),
            SystemRole::GlobalAdmin => self.license.is_advanced_permissions_licensed(),
            SystemRole::GlobalOwner
            | SystemRole::GlobalMember
            | SystemRole::ProjectPersonalOwner
            | SystemRole::CredentialOwner
            | SystemRole::CredentialUser
            | SystemRole::WorkflowOwner
            | SystemRole::WorkflowEditor => true,
        }
    }

    /// The full role catalogue with `licensed` computed for this request.
    pub fn all_roles(&self) -> RoleCatalog {
        let catalog = RoleCatalog::from_registry(self.registry, |role| self.is_licensed(&role.slug));
        tracing::debug!(roles = catalog.len(), "Built licensed role catalogue");
        catalog
    }
}
