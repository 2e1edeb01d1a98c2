//! Service configuration loaded from CLI, environment, and files.
//!
//! [`MarginaliaConfig`] merges values with ortho-config's layered approach;
//! [`MarginaliaConfig::settings`] validates them once at start-up into the
//! [`ServerSettings`] shared by every request handler.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.marginalia.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `MARGINALIA_*`, plus the legacy
//!    `GITHUB_TOKEN` and `COOKIE_KEY`
//! 4. **Command-line arguments** – `--bind-address`, `--service-token`, ...
//!
//! # Configuration File
//!
//! ```toml
//! bind_address = "0.0.0.0:8080"
//! github_api_url = "https://api.github.com"
//! service_token = "ghp_example"
//! cookie_key = "0123456789abcdef0123456789abcdef"
//! request_timeout_seconds = 10
//! default_category_name = "General"
//! log_filter = "info,marginalia=debug"
//! ```

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::COOKIE_KEY_LENGTH;
use crate::error::ServiceError;
use crate::github::locator::AccessToken;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_CATEGORY_NAME: &str = "General";
const DEFAULT_LOG_FILTER: &str = "info";

/// Service configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `MARGINALIA_BIND_ADDRESS`: Socket address to listen on
/// - `MARGINALIA_GITHUB_API_URL`: GitHub API base URL
/// - `MARGINALIA_SERVICE_TOKEN` or `GITHUB_TOKEN`: Token for anonymous reads
///   and setup
/// - `MARGINALIA_COOKIE_KEY` or `COOKIE_KEY`: 32-byte cookie encryption key
/// - `MARGINALIA_REQUEST_TIMEOUT_SECONDS`: Timeout for each GitHub call
/// - `MARGINALIA_DEFAULT_CATEGORY_NAME`: Category used by setup
/// - `MARGINALIA_LOG_FILTER`: `tracing` filter directives
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "MARGINALIA",
    discovery(
        dotfile_name = ".marginalia.toml",
        config_file_name = "marginalia.toml",
        app_name = "marginalia"
    )
)]
pub struct MarginaliaConfig {
    /// Socket address the HTTP server binds to.
    #[ortho_config(cli_short = 'b')]
    pub bind_address: String,

    /// GitHub API base URL; GraphQL requests go to `<base>/graphql`.
    ///
    /// Use `https://<host>/api` for GitHub Enterprise Server.
    #[ortho_config()]
    pub github_api_url: String,

    /// Token used for anonymous listing and repository setup.
    #[ortho_config(cli_short = 't')]
    pub service_token: Option<String>,

    /// Key used to decrypt the `github_token` cookie.
    #[ortho_config()]
    pub cookie_key: Option<String>,

    /// Timeout applied to each GitHub call, in seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Discussion category used by setup when none is requested.
    #[ortho_config()]
    pub default_category_name: String,

    /// `tracing` filter directives, e.g. `info,marginalia=debug`.
    #[ortho_config()]
    pub log_filter: String,
}

impl Default for MarginaliaConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_owned(),
            service_token: None,
            cookie_key: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            default_category_name: DEFAULT_CATEGORY_NAME.to_owned(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl MarginaliaConfig {
    /// Resolves the service token, falling back to `GITHUB_TOKEN`.
    ///
    /// Returns `None` when no source provides a non-blank token; anonymous
    /// listing and setup then fail per request.
    #[must_use]
    pub fn resolve_service_token(&self) -> Option<AccessToken> {
        self.service_token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .and_then(|value| AccessToken::new(value).ok())
    }

    /// Resolves the cookie key, falling back to `COOKIE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] when no key is configured or
    /// the key is not exactly 32 bytes.
    pub fn resolve_cookie_key(&self) -> Result<Vec<u8>, ServiceError> {
        let key = self
            .cookie_key
            .clone()
            .or_else(|| env::var("COOKIE_KEY").ok())
            .ok_or_else(|| ServiceError::Configuration {
                message: "cookie key is required (MARGINALIA_COOKIE_KEY or COOKIE_KEY)".to_owned(),
            })?;
        if key.len() != COOKIE_KEY_LENGTH {
            return Err(ServiceError::Configuration {
                message: format!(
                    "cookie key must be {COOKIE_KEY_LENGTH} bytes, got {}",
                    key.len()
                ),
            });
        }
        Ok(key.into_bytes())
    }

    /// Validates the configuration into [`ServerSettings`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Configuration`] for an unparsable bind address,
    /// a zero timeout or a bad cookie key, and [`ServiceError::InvalidUrl`]
    /// for an unparsable API URL.
    pub fn settings(&self) -> Result<ServerSettings, ServiceError> {
        let bind_address =
            self.bind_address
                .parse::<SocketAddr>()
                .map_err(|error| ServiceError::Configuration {
                    message: format!("invalid bind address {}: {error}", self.bind_address),
                })?;
        let api_base = Url::parse(&self.github_api_url)
            .map_err(|error| ServiceError::InvalidUrl(format!("{}: {error}", self.github_api_url)))?;
        if self.request_timeout_seconds == 0 {
            return Err(ServiceError::Configuration {
                message: "request_timeout_seconds must be positive".to_owned(),
            });
        }
        let default_category_name = self.default_category_name.trim();
        if default_category_name.is_empty() {
            return Err(ServiceError::Configuration {
                message: "default_category_name must not be blank".to_owned(),
            });
        }

        Ok(ServerSettings {
            bind_address,
            api_base,
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
            service_token: self.resolve_service_token(),
            cookie_key: self.resolve_cookie_key()?,
            default_category_name: default_category_name.to_owned(),
            log_filter: self.log_filter.clone(),
        })
    }
}

/// Validated configuration shared by the server.
#[derive(Clone)]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_address: SocketAddr,
    /// GitHub API base URL.
    pub api_base: Url,
    /// Timeout for each GitHub call.
    pub request_timeout: Duration,
    /// Token for anonymous listing and setup.
    pub service_token: Option<AccessToken>,
    /// Raw cookie encryption key.
    pub cookie_key: Vec<u8>,
    /// Category used by setup when none is requested.
    pub default_category_name: String,
    /// `tracing` filter directives.
    pub log_filter: String,
}

impl std::fmt::Debug for ServerSettings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ServerSettings")
            .field("bind_address", &self.bind_address)
            .field("api_base", &self.api_base.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("service_token", &self.service_token)
            .field("cookie_key", &"***")
            .field("default_category_name", &self.default_category_name)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

#[cfg(test)]
mod tests;
