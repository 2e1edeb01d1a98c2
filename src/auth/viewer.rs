//! Identity of the GitHub user behind a token.

use serde::{Deserialize, Serialize};

/// Caller identity as exchanged with the embedding client.
///
/// Field names follow the client's JSON: `name` is the GitHub login and
/// `login` lists organisation logins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewer {
    /// Numeric GitHub user id.
    pub id: i64,
    /// GitHub login.
    pub name: String,
    /// Public email, empty when hidden.
    pub email: String,
    /// Avatar image URL.
    #[serde(alias = "avatarUrl")]
    pub avatar_url: String,
    /// Logins of the organisations the user belongs to.
    #[serde(rename = "login", alias = "organizationLogins")]
    pub organization_logins: Vec<String>,
}

impl Viewer {
    /// Whether the user belongs to any of `organisations`.
    #[must_use]
    pub fn is_in_org(&self, organisations: &[&str]) -> bool {
        self.organization_logins
            .iter()
            .any(|login| organisations.contains(&login.as_str()))
    }
}
