//! HTTP surface for the embedding client.
//!
//! Routes:
//!
//! - `POST /{org}/{repo}/{page}/comments?category_id=&repo_id=` creates a comment
//! - `GET /{org}/{repo}/{page}/comments?category_id=&repo_id=&permission_level=`
//!   lists unresolved comments
//! - `PATCH /{org}/{repo}/{page}/comments` resolves a comment
//! - `POST /{org}/{repo}/setup?category_name=` looks up category and repository ids
//! - `POST /{org}/permissions` evaluates a permission level for a caller

mod cookies;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::auth::{AesGcmTokenDecryptor, TokenDecryptor};
use crate::config::ServerSettings;
use crate::error::ServiceError;
use crate::github::gateway::{DiscussionGateway, GraphQlDiscussionGateway};
use crate::github::graphql::OctocrabTransport;
use crate::github::locator::AccessToken;

pub use cookies::TOKEN_COOKIE;
pub use error::status_for;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<ServerSettings>,
    gateway: Arc<dyn DiscussionGateway>,
    decryptor: Arc<dyn TokenDecryptor>,
}

impl AppState {
    /// Assembles state from explicit collaborators.
    #[must_use]
    pub fn new(
        settings: ServerSettings,
        gateway: Arc<dyn DiscussionGateway>,
        decryptor: Arc<dyn TokenDecryptor>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            gateway,
            decryptor,
        }
    }

    /// Builds the production GraphQL gateway and AES-GCM decryptor.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidUrl`] for an unusable API base and
    /// [`ServiceError::Configuration`] for a bad cookie key.
    pub fn from_settings(settings: ServerSettings) -> Result<Self, ServiceError> {
        let transport = OctocrabTransport::new(&settings.api_base, settings.request_timeout)?;
        let decryptor = AesGcmTokenDecryptor::new(&settings.cookie_key)?;
        Ok(Self::new(
            settings,
            Arc::new(GraphQlDiscussionGateway::new(transport)),
            Arc::new(decryptor),
        ))
    }

    /// Validated settings.
    #[must_use]
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    fn gateway(&self) -> &dyn DiscussionGateway {
        self.gateway.as_ref()
    }

    fn service_token(&self) -> Result<AccessToken, ServiceError> {
        self.settings
            .service_token
            .clone()
            .ok_or_else(|| ServiceError::Configuration {
                message: "Missing GitHub config".to_owned(),
            })
    }

    fn decrypt_token(&self, sealed: &str) -> Result<AccessToken, ServiceError> {
        self.decryptor.decrypt(sealed).inspect_err(|error| {
            tracing::warn!(%error, "failed to decrypt token cookie");
        })
    }
}

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}

/// Binds `address` and serves requests until the process stops.
///
/// # Errors
///
/// Returns [`ServiceError::Io`] when binding or serving fails.
pub async fn serve(state: AppState, address: SocketAddr) -> Result<(), ServiceError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|error| ServiceError::Io {
            message: format!("failed to bind {address}: {error}"),
        })?;
    tracing::info!(%address, "marginalia listening");
    axum::serve(listener, router(state))
        .await
        .map_err(|error| ServiceError::Io {
            message: error.to_string(),
        })
}
