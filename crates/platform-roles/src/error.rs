//! Error types for scope resolution
//!
//! Unknown role slugs and missing project relations are not errors: they
//! contribute no scopes. Only contract violations by the caller surface here.

use thiserror::Error;

/// Scope resolution error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// A record passed for annotation is neither a workflow nor a credential.
    #[error("Cannot detect if entity is a workflow or credential")]
    Classification,

    /// A raw share record is missing its project id or role.
    #[error("Malformed share record: {0}")]
    MalformedShare(String),

    /// A custom role slug is empty or collides with a reserved system slug.
    #[error("Invalid role slug: {0:?}")]
    InvalidRoleSlug(String),
}

/// Result type for scope resolution operations.
pub type ScopeResult<T> = Result<T, ScopeError>;

impl ScopeError {
    /// Check if this error indicates a server-side contract violation.
    ///
    /// Server errors should be logged at error level; they mean a caller
    /// handed over a record shape the resolver does not support.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ScopeError::Classification | ScopeError::MalformedShare(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ScopeError::Classification | ScopeError::MalformedShare(_) => 500,
            ScopeError::InvalidRoleSlug(_) => 400,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ScopeError::Classification => "ENTITY_CLASSIFICATION_FAILED",
            ScopeError::MalformedShare(_) => "MALFORMED_SHARE",
            ScopeError::InvalidRoleSlug(_) => "INVALID_ROLE_SLUG",
        }
    }
}
