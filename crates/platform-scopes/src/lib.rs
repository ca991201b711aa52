//! # Platform Scopes
//!
//! Scope vocabulary and scope-set algebra for the Relay platform.
//!
//! ## Overview
//!
//! The platform-scopes crate handles:
//! - **Scopes**: Atomic `<category>:<action>` permission tokens
//! - **Resource Categories**: The prefixes scopes are grouped by
//! - **Scope Sets**: Deduplicated scope collections with a deterministic output order
//! - **Combination**: Merging named scope groups under a mask
//!
//! ## Architecture
//!
//! ```text
//! Scope = Category ":" Action
//!
//! Examples:
//!   "workflow:read"        - Read a workflow
//!   "credential:share"     - Share a credential with another project
//!   "project:list"         - List projects
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use platform_scopes::{combine_scopes, Scope, ScopeGroup, GLOBAL_GROUP, PROJECT_GROUP, SHARING_GROUP};
//!
//! let global = vec![Scope::new("workflow:read"), Scope::new("workflow:execute")];
//! let project = vec![
//!     Scope::new("workflow:read"),
//!     Scope::new("workflow:update"),
//!     Scope::new("workflow:delete"),
//! ];
//! let sharing = vec![Scope::new("workflow:read"), Scope::new("workflow:update")];
//!
//! let effective = combine_scopes(
//!     &[ScopeGroup::new(GLOBAL_GROUP, &global), ScopeGroup::new(PROJECT_GROUP, &project)],
//!     &[ScopeGroup::new(SHARING_GROUP, &sharing)],
//!     &[GLOBAL_GROUP],
//! );
//!
//! let tokens: Vec<String> = effective.into_sorted_vec().iter().map(|s| s.to_string()).collect();
//! assert_eq!(tokens, ["workflow:execute", "workflow:read", "workflow:update"]);
//! ```
//!
//! ## Integration with platform-roles
//!
//! This crate knows nothing about roles. `platform-roles` maps role slugs to
//! scope lists and drives [`combine_scopes`] with the global/project/sharing
//! layering.

pub mod category;
pub mod combine;
pub mod scope;

// Re-export main types for convenience
pub use category::ResourceCategory;
pub use combine::{combine_scopes, ScopeGroup, GLOBAL_GROUP, PROJECT_GROUP, SHARING_GROUP};
pub use scope::{Scope, ScopeSet};
