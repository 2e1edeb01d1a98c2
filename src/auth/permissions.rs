//! Visibility levels and the decision table that gates them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

use super::viewer::Viewer;

/// Who may see or post comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionLevel {
    /// Anyone, signed in or not.
    #[serde(rename = "anon")]
    Anonymous,
    /// Any signed-in GitHub user.
    #[default]
    #[serde(rename = "auth")]
    Authenticated,
    /// Members of the repository's organisation.
    #[serde(rename = "team")]
    Team,
}

impl PermissionLevel {
    /// Wire spelling of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anon",
            Self::Authenticated => "auth",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = ServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "anon" => Ok(Self::Anonymous),
            "auth" => Ok(Self::Authenticated),
            "team" => Ok(Self::Team),
            other => Err(ServiceError::InvalidRequest {
                message: format!("unknown permission_level: {other}"),
            }),
        }
    }
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    /// The caller may proceed.
    Allow,
    /// The caller is rejected.
    Deny,
}

/// Applies the visibility table for `organisation`.
///
/// A missing identity is denied for team-only content.
#[must_use]
pub fn evaluate(
    level: PermissionLevel,
    viewer: Option<&Viewer>,
    organisation: &str,
) -> PermissionDecision {
    let allowed = match level {
        PermissionLevel::Anonymous => true,
        PermissionLevel::Authenticated => viewer.is_some(),
        PermissionLevel::Team => viewer.is_some_and(|found| found.is_in_org(&[organisation])),
    };
    if allowed {
        PermissionDecision::Allow
    } else {
        PermissionDecision::Deny
    }
}

/// [`evaluate`] as a `Result`, for use with `?`.
///
/// # Errors
///
/// Returns [`ServiceError::Unauthorized`] when the decision is
/// [`PermissionDecision::Deny`].
pub fn authorize(
    level: PermissionLevel,
    viewer: Option<&Viewer>,
    organisation: &str,
) -> Result<(), ServiceError> {
    match evaluate(level, viewer, organisation) {
        PermissionDecision::Allow => Ok(()),
        PermissionDecision::Deny => {
            tracing::info!(%level, organisation, "permission check rejected caller");
            Err(ServiceError::Unauthorized {
                message: format!("{level} access to {organisation} denied"),
            })
        }
    }
}
