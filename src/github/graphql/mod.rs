//! Typed access to the GitHub GraphQL endpoint.
//!
//! [`GraphQlTransport`] is the single outbound primitive: send a query with
//! variables under a bearer token and get back the HTTP status and raw body.
//! [`GraphQlClient`] layers status checking and envelope decoding on top so
//! gateway code only deals with typed `data` payloads.

mod error_mapping;
mod transport;

pub use transport::OctocrabTransport;

use async_trait::async_trait;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::github::locator::AccessToken;

use error_mapping::map_http_error;

/// A GraphQL document plus its variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    /// Human-readable operation name used in logs and errors.
    #[serde(skip)]
    pub operation: &'static str,
    /// GraphQL document.
    pub query: &'static str,
    /// Variables object.
    pub variables: serde_json::Value,
}

impl GraphQlRequest {
    /// Creates a request for `query` with the given variables.
    #[must_use]
    pub const fn new(
        operation: &'static str,
        query: &'static str,
        variables: serde_json::Value,
    ) -> Self {
        Self {
            operation,
            query,
            variables,
        }
    }
}

/// Undecoded response from the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body.
    pub body: String,
}

/// Sends GraphQL requests to GitHub.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    /// Posts `request` with `token` as bearer authorisation.
    ///
    /// Only transport failures are errors; any HTTP status is returned as-is.
    async fn execute(
        &self,
        token: &AccessToken,
        request: &GraphQlRequest,
    ) -> Result<RawResponse, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct Envelope<Data> {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    message: String,
}

/// Status-checking, decoding wrapper around a [`GraphQlTransport`].
pub struct GraphQlClient<Transport> {
    transport: Transport,
}

impl<Transport> GraphQlClient<Transport>
where
    Transport: GraphQlTransport,
{
    /// Wraps a transport.
    #[must_use]
    pub const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Executes `request` and decodes the `data` member into `Data`.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, [`ServiceError::Authentication`]
    /// or [`ServiceError::Api`] for non-200 statuses,
    /// [`ServiceError::GraphQl`] when GitHub reports GraphQL errors, and
    /// [`ServiceError::Decode`] when the body is not the expected shape.
    pub async fn send<Data>(
        &self,
        token: &AccessToken,
        request: &GraphQlRequest,
    ) -> Result<Data, ServiceError>
    where
        Data: DeserializeOwned,
    {
        let response = self.transport.execute(token, request).await?;
        if response.status != StatusCode::OK {
            return Err(map_http_error(
                request.operation,
                response.status,
                response.body,
            ));
        }
        decode_envelope(request.operation, &response.body)
    }
}

fn decode_envelope<Data>(operation: &str, body: &str) -> Result<Data, ServiceError>
where
    Data: DeserializeOwned,
{
    let envelope: Envelope<Data> =
        serde_json::from_str(body).map_err(|error| ServiceError::Decode {
            operation: operation.to_owned(),
            message: error.to_string(),
        })?;

    if !envelope.errors.is_empty() {
        let message = envelope
            .errors
            .into_iter()
            .map(|error| error.message)
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(operation, %message, "GitHub reported GraphQL errors");
        return Err(ServiceError::GraphQl { message });
    }

    envelope.data.ok_or_else(|| ServiceError::Decode {
        operation: operation.to_owned(),
        message: "response contained no data".to_owned(),
    })
}
