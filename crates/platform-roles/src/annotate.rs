//! Scope annotation of workflow and credential records
//!
//! Records leaving the list and detail endpoints carry a `scopes` field with
//! the requesting user's effective scopes over that record.

use platform_scopes::{ResourceCategory, Scope};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::error::{ScopeError, ScopeResult};
use crate::principal::{ProjectRelation, Share, User};
use crate::registry::RoleRegistry;
use crate::resolver::ScopeResolver;
use crate::slug::RoleSlug;

/// A record that can be annotated with effective scopes.
pub trait ScopedEntity {
    /// Whether the record was loaded with its shares.
    fn has_shares(&self) -> bool;

    /// The record's shares, or `None` when the record was loaded without them
    /// (for example a partial projection).
    fn shares(&self) -> ScopeResult<Option<Cow<'_, [Share]>>>;

    /// Whether this record is a workflow or a credential.
    fn resource_category(&self) -> Option<ResourceCategory>;

    /// Replace the record's scopes.
    fn set_scopes(&mut self, scopes: Vec<Scope>);
}

/// A workflow as loaded for list and detail responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    /// Workflow ID
    pub id: String,

    /// Workflow name
    pub name: String,

    /// Whether the workflow is activated
    pub active: bool,

    /// Projects the workflow is shared with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<Vec<Share>>,

    /// Effective scopes of the requesting user
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

impl WorkflowRecord {
    /// Creates an inactive workflow record without shares.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: false,
            shared: None,
            scopes: Vec::new(),
        }
    }

    /// Attach shares.
    pub fn with_shares(mut self, shares: Vec<Share>) -> Self {
        self.shared = Some(shares);
        self
    }
}

impl ScopedEntity for WorkflowRecord {
    fn has_shares(&self) -> bool {
        self.shared.is_some()
    }

    fn shares(&self) -> ScopeResult<Option<Cow<'_, [Share]>>> {
        Ok(self.shared.as_deref().map(Cow::Borrowed))
    }

    fn resource_category(&self) -> Option<ResourceCategory> {
        Some(ResourceCategory::Workflow)
    }

    fn set_scopes(&mut self, scopes: Vec<Scope>) {
        self.scopes = scopes;
    }
}

/// A credential as loaded for list and detail responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Credential ID
    pub id: String,

    /// Credential name
    pub name: String,

    /// Credential type, e.g. `githubApi`
    #[serde(rename = "type")]
    pub credential_type: String,

    /// Projects the credential is shared with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<Vec<Share>>,

    /// Effective scopes of the requesting user
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

impl CredentialRecord {
    /// Creates a credential record without shares.
    pub fn new(id: impl Into<String>, name: impl Into<String>, credential_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            credential_type: credential_type.into(),
            shared: None,
            scopes: Vec::new(),
        }
    }

    /// Attach shares.
    pub fn with_shares(mut self, shares: Vec<Share>) -> Self {
        self.shared = Some(shares);
        self
    }
}

impl ScopedEntity for CredentialRecord {
    fn has_shares(&self) -> bool {
        self.shared.is_some()
    }

    fn shares(&self) -> ScopeResult<Option<Cow<'_, [Share]>>> {
        Ok(self.shared.as_deref().map(Cow::Borrowed))
    }

    fn resource_category(&self) -> Option<ResourceCategory> {
        Some(ResourceCategory::Credential)
    }

    fn set_scopes(&mut self, scopes: Vec<Scope>) {
        self.scopes = scopes;
    }
}

/// Raw JSON records.
///
/// Workflows are recognized by an `active` key and credentials by a `type` key.
/// Each `shared` entry needs a `projectId` (or a nested `project.id`) and a
/// `role`, given either as a slug or as an object with a `slug`. A slug that is
/// not a valid role is kept as [`RoleSlug::Unknown`] and grants nothing.
impl ScopedEntity for Map<String, Value> {
    fn has_shares(&self) -> bool {
        !matches!(self.get("shared"), None | Some(Value::Null))
    }

    fn shares(&self) -> ScopeResult<Option<Cow<'_, [Share]>>> {
        let items = match self.get("shared") {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(ScopeError::MalformedShare("`shared` is not an array".to_string())),
        };

        let shares = items.iter().map(parse_share).collect::<ScopeResult<Vec<_>>>()?;
        Ok(Some(Cow::Owned(shares)))
    }

    fn resource_category(&self) -> Option<ResourceCategory> {
        if self.contains_key("active") {
            Some(ResourceCategory::Workflow)
        } else if self.contains_key("type") {
            Some(ResourceCategory::Credential)
        } else {
            None
        }
    }

    fn set_scopes(&mut self, scopes: Vec<Scope>) {
        let scopes = scopes.into_iter().map(|scope| Value::String(scope.to_string())).collect();
        self.insert("scopes".to_string(), Value::Array(scopes));
    }
}

fn parse_share(item: &Value) -> ScopeResult<Share> {
    let project_id = item
        .get("projectId")
        .and_then(Value::as_str)
        .or_else(|| item.get("project").and_then(|project| project.get("id")).and_then(Value::as_str))
        .ok_or_else(|| ScopeError::MalformedShare("share without a project id".to_string()))?;

    let role = match item.get("role") {
        Some(Value::String(slug)) => slug.as_str(),
        Some(Value::Object(role)) => role
            .get("slug")
            .and_then(Value::as_str)
            .ok_or_else(|| ScopeError::MalformedShare("share role without a slug".to_string()))?,
        _ => return Err(ScopeError::MalformedShare(format!("share for project {project_id} has no role"))),
    };

    Ok(Share::new(project_id, RoleSlug::from_stored(role)))
}

/// Attaches effective scopes to workflow and credential records.
///
/// # Examples
///
/// ```
/// use platform_roles::{EntityScopeAnnotator, GlobalRole, RoleRegistry, Share, SystemRole, User, WorkflowRecord};
///
/// let annotator = EntityScopeAnnotator::new(RoleRegistry::shared());
/// let admin = User::new("u1", GlobalRole::Admin);
///
/// let workflow = WorkflowRecord::new("wf-1", "Nightly sync")
///     .with_shares(vec![Share::new("p1", SystemRole::WorkflowOwner)]);
/// let workflow = annotator.annotate(workflow, &admin, &[]).unwrap();
///
/// assert!(workflow.scopes.iter().any(|s| s.as_str() == "workflow:delete"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EntityScopeAnnotator<'r> {
    resolver: ScopeResolver<'r>,
}

impl<'r> EntityScopeAnnotator<'r> {
    /// Creates an annotator over a registry.
    pub fn new(registry: &'r RoleRegistry) -> Self {
        Self {
            resolver: ScopeResolver::new(registry),
        }
    }

    /// Set `entity`'s scopes to `principal`'s effective scopes over it.
    ///
    /// Records without shares get an empty scope list. No other field is
    /// touched.
    ///
    /// # Errors
    ///
    /// - [`ScopeError::Classification`] if the record has shares but is neither
    ///   a workflow nor a credential
    /// - [`ScopeError::MalformedShare`] if a raw share has no project id or role
    pub fn annotate<E: ScopedEntity>(
        &self,
        mut entity: E,
        principal: &User,
        relations: &[ProjectRelation],
    ) -> ScopeResult<E> {
        let scopes = self.resolve(&entity, principal, relations)?.unwrap_or_default();
        entity.set_scopes(scopes);
        Ok(entity)
    }

    /// Annotate every record of a page, failing on the first bad record.
    pub fn annotate_all<E: ScopedEntity>(
        &self,
        entities: Vec<E>,
        principal: &User,
        relations: &[ProjectRelation],
    ) -> ScopeResult<Vec<E>> {
        entities
            .into_iter()
            .map(|entity| self.annotate(entity, principal, relations))
            .collect()
    }

    fn resolve<E: ScopedEntity>(
        &self,
        entity: &E,
        principal: &User,
        relations: &[ProjectRelation],
    ) -> ScopeResult<Option<Vec<Scope>>> {
        if !entity.has_shares() {
            return Ok(None);
        }

        let Some(category) = entity.resource_category() else {
            tracing::error!(user = %principal.id, "Cannot detect if entity is a workflow or credential");
            return Err(ScopeError::Classification);
        };

        let shares = entity.shares()?.unwrap_or_default();

        Ok(Some(self.resolver.effective_scopes(category, principal, &shares, relations)))
    }
}
