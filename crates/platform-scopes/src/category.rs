//! # Resource Categories
//!
//! Defines the resource categories that prefix every scope.
//! A scope `workflow:read` belongs to the `workflow` category.

use serde::{Deserialize, Serialize};

/// Resource categories known to the built-in scope catalogue.
///
/// Only [`ResourceCategory::Workflow`] and [`ResourceCategory::Credential`] can be
/// shared between projects; the remaining categories appear in global and project
/// role grants only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    /// Workflow resources (shareable).
    Workflow,
    /// Credential resources (shareable).
    Credential,
    /// Project resources.
    Project,
    /// User resources.
    User,
    /// Tag resources.
    Tag,
    /// Variable resources.
    Variable,
    /// License management.
    License,
}

impl ResourceCategory {
    /// Get the string representation used as the scope prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Workflow => "workflow",
            ResourceCategory::Credential => "credential",
            ResourceCategory::Project => "project",
            ResourceCategory::User => "user",
            ResourceCategory::Tag => "tag",
            ResourceCategory::Variable => "variable",
            ResourceCategory::License => "license",
        }
    }

    /// Parse a category from its scope prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use platform_scopes::ResourceCategory;
    ///
    /// assert_eq!(ResourceCategory::parse("workflow"), Some(ResourceCategory::Workflow));
    /// assert_eq!(ResourceCategory::parse("Credential"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "workflow" => Some(ResourceCategory::Workflow),
            "credential" => Some(ResourceCategory::Credential),
            "project" => Some(ResourceCategory::Project),
            "user" => Some(ResourceCategory::User),
            "tag" => Some(ResourceCategory::Tag),
            "variable" => Some(ResourceCategory::Variable),
            "license" => Some(ResourceCategory::License),
            _ => None,
        }
    }

    /// Whether resources of this category can be shared with other projects.
    pub fn is_shareable(&self) -> bool {
        matches!(self, ResourceCategory::Workflow | ResourceCategory::Credential)
    }

    /// Get all categories.
    pub fn all() -> &'static [ResourceCategory] {
        &[
            ResourceCategory::Workflow,
            ResourceCategory::Credential,
            ResourceCategory::Project,
            ResourceCategory::User,
            ResourceCategory::Tag,
            ResourceCategory::Variable,
            ResourceCategory::License,
        ]
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_through_prefix() {
        for category in ResourceCategory::all() {
            assert_eq!(ResourceCategory::parse(category.as_str()), Some(*category));
        }
        assert_eq!(ResourceCategory::parse("bogus"), None);
    }

    #[test]
    fn test_only_workflows_and_credentials_are_shareable() {
        let shareable: Vec<_> = ResourceCategory::all()
            .iter()
            .filter(|c| c.is_shareable())
            .collect();
        assert_eq!(
            shareable,
            vec![&ResourceCategory::Workflow, &ResourceCategory::Credential]
        );
    }
}
