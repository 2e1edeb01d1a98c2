//! Octocrab-backed GraphQL transport.

use std::time::Duration;

use async_trait::async_trait;
use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use url::Url;

use crate::error::ServiceError;
use crate::github::locator::AccessToken;

use super::error_mapping::map_octocrab_error;
use super::{GraphQlRequest, GraphQlTransport, RawResponse};

const GRAPHQL_PATH: &str = "/graphql";

/// Builds an Octocrab client for the given token and API base URL.
///
/// Retries are disabled: mutations such as `addDiscussionComment` are not
/// idempotent, so every call is attempted exactly once.
///
/// # Errors
///
/// Returns `ServiceError::Configuration` when Octocrab fails to construct a
/// client.
fn build_octocrab_client(token: &AccessToken, api_base: &Uri) -> Result<Octocrab, ServiceError> {
    Octocrab::builder()
        .add_retry_config(RetryConfig::None)
        .personal_token(token.as_ref())
        .base_uri(api_base.clone())
        .map_err(|error| ServiceError::Configuration {
            message: format!("invalid GitHub API base: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Posts GraphQL documents to `<api base>/graphql` through Octocrab.
///
/// A client is built per call because each request carries its own caller
/// token.
#[derive(Debug, Clone)]
pub struct OctocrabTransport {
    api_base: Uri,
    timeout: Duration,
}

impl OctocrabTransport {
    /// Creates a transport for the given API base (e.g.
    /// `https://api.github.com`) with a per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidUrl`] when the base cannot be parsed.
    pub fn new(api_base: &Url, timeout: Duration) -> Result<Self, ServiceError> {
        let trimmed = api_base.as_str().trim_end_matches('/');
        let uri = trimmed
            .parse::<Uri>()
            .map_err(|error| ServiceError::InvalidUrl(error.to_string()))?;
        Ok(Self {
            api_base: uri,
            timeout,
        })
    }

    async fn post(
        &self,
        token: &AccessToken,
        request: &GraphQlRequest,
    ) -> Result<RawResponse, ServiceError> {
        let client = build_octocrab_client(token, &self.api_base)?;
        let response = client
            ._post(Uri::from_static(GRAPHQL_PATH), Some(request))
            .await
            .map_err(|error| map_octocrab_error(request.operation, &error))?;
        let status = response.status();
        let body = client
            .body_to_string(response)
            .await
            .map_err(|error| map_octocrab_error(request.operation, &error))?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl GraphQlTransport for OctocrabTransport {
    async fn execute(
        &self,
        token: &AccessToken,
        request: &GraphQlRequest,
    ) -> Result<RawResponse, ServiceError> {
        tracing::debug!(operation = request.operation, "calling GitHub GraphQL");
        tokio::time::timeout(self.timeout, self.post(token, request))
            .await
            .map_err(|_elapsed| ServiceError::Timeout {
                operation: request.operation.to_owned(),
                seconds: self.timeout.as_secs(),
            })?
    }
}
