//! License configuration.
//!
//! The license state is read from environment variables: a tier sets the
//! baseline flags and individual variables override single flags.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::license::{LicenseFlags, LicenseTier};

/// Environment variable holding the license tier.
pub const LICENSE_TIER_VAR: &str = "PLATFORM_LICENSE_TIER";

/// Environment variable overriding the project admin flag.
pub const PROJECT_ROLE_ADMIN_VAR: &str = "PLATFORM_LICENSE_PROJECT_ROLE_ADMIN";

/// Environment variable overriding the project editor flag.
pub const PROJECT_ROLE_EDITOR_VAR: &str = "PLATFORM_LICENSE_PROJECT_ROLE_EDITOR";

/// Environment variable overriding the project viewer flag.
pub const PROJECT_ROLE_VIEWER_VAR: &str = "PLATFORM_LICENSE_PROJECT_ROLE_VIEWER";

/// Environment variable overriding the advanced permissions flag.
pub const ADVANCED_PERMISSIONS_VAR: &str = "PLATFORM_LICENSE_ADVANCED_PERMISSIONS";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// License configuration: a tier plus optional per-flag overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseConfig {
    /// License tier.
    pub tier: LicenseTier,

    /// Override for the project admin flag.
    pub project_role_admin: Option<bool>,

    /// Override for the project editor flag.
    pub project_role_editor: Option<bool>,

    /// Override for the project viewer flag.
    pub project_role_viewer: Option<bool>,

    /// Override for the advanced permissions flag.
    pub advanced_permissions: Option<bool>,
}

impl LicenseConfig {
    /// Creates a configuration for a tier without overrides.
    pub fn for_tier(tier: LicenseTier) -> Self {
        Self {
            tier,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PLATFORM_LICENSE_TIER`: community, pro, business or enterprise (default: community)
    /// - `PLATFORM_LICENSE_PROJECT_ROLE_ADMIN`: override the project admin flag
    /// - `PLATFORM_LICENSE_PROJECT_ROLE_EDITOR`: override the project editor flag
    /// - `PLATFORM_LICENSE_PROJECT_ROLE_VIEWER`: override the project viewer flag
    /// - `PLATFORM_LICENSE_ADVANCED_PERMISSIONS`: override the advanced permissions flag
    ///
    /// Invalid values are logged and the defaults are used instead.
    pub fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid license configuration, using community defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from environment variables, rejecting invalid values.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tier = match lookup(LICENSE_TIER_VAR) {
            Some(value) => LicenseTier::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: LICENSE_TIER_VAR.to_string(),
                message: format!("unknown license tier {value:?}"),
            })?,
            None => LicenseTier::default(),
        };

        let flag = |key: &str| -> Result<Option<bool>, ConfigError> {
            lookup(key).map(|value| parse_bool(key, &value)).transpose()
        };

        Ok(Self {
            tier,
            project_role_admin: flag(PROJECT_ROLE_ADMIN_VAR)?,
            project_role_editor: flag(PROJECT_ROLE_EDITOR_VAR)?,
            project_role_viewer: flag(PROJECT_ROLE_VIEWER_VAR)?,
            advanced_permissions: flag(ADVANCED_PERMISSIONS_VAR)?,
        })
    }

    /// The effective license flags: the tier's flags with overrides applied.
    pub fn flags(&self) -> LicenseFlags {
        let base = self.tier.flags();
        LicenseFlags {
            project_role_admin: self.project_role_admin.unwrap_or(base.project_role_admin),
            project_role_editor: self.project_role_editor.unwrap_or(base.project_role_editor),
            project_role_viewer: self.project_role_viewer.unwrap_or(base.project_role_viewer),
            advanced_permissions: self.advanced_permissions.unwrap_or(base.advanced_permissions),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {value:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_community() {
        let config = LicenseConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, LicenseConfig::default());
        assert_eq!(config.flags(), LicenseFlags::default());
    }

    #[test]
    fn test_tier_and_overrides() {
        let config = LicenseConfig::from_lookup(lookup(&[
            (LICENSE_TIER_VAR, "business"),
            (PROJECT_ROLE_VIEWER_VAR, "1"),
            (ADVANCED_PERMISSIONS_VAR, "false"),
        ]))
        .unwrap();

        assert_eq!(config.tier, LicenseTier::Business);
        let flags = config.flags();
        assert!(flags.project_role_admin);
        assert!(flags.project_role_editor);
        assert!(flags.project_role_viewer);
        assert!(!flags.advanced_permissions);
    }

    #[test]
    fn test_invalid_tier_is_rejected() {
        let err = LicenseConfig::from_lookup(lookup(&[(LICENSE_TIER_VAR, "platinum")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == LICENSE_TIER_VAR));
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let err = LicenseConfig::from_lookup(lookup(&[(PROJECT_ROLE_ADMIN_VAR, "maybe")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for PLATFORM_LICENSE_PROJECT_ROLE_ADMIN: expected a boolean, got \"maybe\""
        );
    }

    #[test]
    fn test_for_tier_has_no_overrides() {
        let config = LicenseConfig::for_tier(LicenseTier::Enterprise);
        assert_eq!(config.flags(), LicenseTier::Enterprise.flags());
    }
}
