//! # Platform Roles
//!
//! Built-in roles, effective scope resolution and role licensing for the
//! Relay platform.
//!
//! ## Overview
//!
//! The platform-roles crate handles:
//! - **Role Registry**: The built-in roles of every namespace and their scopes
//! - **Scope Resolution**: A user's effective scopes over a shared workflow or credential
//! - **Annotation**: Attaching those scopes to records before they leave the API
//! - **Licensing**: Which roles the current license makes available
//!
//! ## Architecture
//!
//! ```text
//! Global role  --------------------------------------------+
//!                                                          |
//! Project role (per project) --+                           v
//!                              +-- ∩ sharing role --> effective scopes
//! Sharing role (per share) ----+
//! ```
//!
//! A workflow or credential is shared with one or more projects, each share
//! carrying a sharing role. A user reaches the resource through their role in
//! those projects, but never beyond what the sharing role allows. Global role
//! scopes apply regardless of sharing.
//!
//! ## Role Namespaces
//!
//! | Namespace    | Roles                                                    |
//! |--------------|----------------------------------------------------------|
//! | `global`     | `global:owner`, `global:admin`, `global:member`          |
//! | `project`    | `project:personalOwner`, `project:admin`, `project:editor`, `project:viewer` |
//! | `credential` | `credential:owner`, `credential:user`                    |
//! | `workflow`   | `workflow:owner`, `workflow:editor`                      |
//!
//! ## Usage
//!
//! ```rust
//! use platform_roles::{
//!     EntityScopeAnnotator, GlobalRole, ProjectRelation, RoleRegistry, Share, SystemRole, User, WorkflowRecord,
//! };
//!
//! let registry = RoleRegistry::shared();
//! let annotator = EntityScopeAnnotator::new(registry);
//!
//! let member = User::new("u1", GlobalRole::Member);
//! let editor = registry.role("project:editor").unwrap().clone();
//! let relations = vec![ProjectRelation::new("p1", editor)];
//!
//! let workflow = WorkflowRecord::new("wf-1", "Invoice import")
//!     .with_shares(vec![Share::new("p1", SystemRole::WorkflowEditor)]);
//! let workflow = annotator.annotate(workflow, &member, &relations).unwrap();
//!
//! let tokens: Vec<&str> = workflow.scopes.iter().map(|s| s.as_str()).collect();
//! assert_eq!(tokens, ["workflow:execute", "workflow:read", "workflow:update"]);
//! ```
//!
//! ## Configuration
//!
//! The license state is read with [`LicenseConfig::from_env`]; see
//! [`config`] for the recognized variables.

pub mod annotate;
pub mod config;
pub mod dto;
pub mod error;
pub mod license;
pub mod principal;
pub mod registry;
pub mod resolver;
pub mod role;
pub mod slug;

// Re-export main types for convenience
pub use annotate::{CredentialRecord, EntityScopeAnnotator, ScopedEntity, WorkflowRecord};
pub use config::{ConfigError, LicenseConfig};
pub use dto::{RoleCatalog, RoleDto};
pub use error::{ScopeError, ScopeResult};
pub use license::{LicenseFlags, LicenseGate, LicenseState, LicenseTier};
pub use principal::{GlobalRole, ProjectRelation, Share, User};
pub use registry::RoleRegistry;
pub use resolver::ScopeResolver;
pub use role::Role;
pub use slug::{CustomRoleSlug, RoleSlug, RoleType, SystemRole};
