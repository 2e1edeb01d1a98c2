//! Mapping of service errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::ServiceError;

/// HTTP status used to report `error`.
///
/// Provider statuses are passed through so callers see what GitHub said.
#[must_use]
pub fn status_for(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::Api { status, .. } | ServiceError::Authentication { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ServiceError::GraphQl { .. } => StatusCode::BAD_GATEWAY,
        ServiceError::Network { .. }
        | ServiceError::Timeout { .. }
        | ServiceError::Decode { .. }
        | ServiceError::Encode { .. }
        | ServiceError::Configuration { .. }
        | ServiceError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::MissingParameter { .. }
        | ServiceError::InvalidRequest { .. }
        | ServiceError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        ServiceError::MissingToken
        | ServiceError::InvalidToken { .. }
        | ServiceError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        ServiceError::RepositoryNotFound { .. }
        | ServiceError::CategoryNotFound { .. }
        | ServiceError::CommentNotFound { .. } => StatusCode::NOT_FOUND,
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::info!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = match self {
            Self::Api { message, .. } | Self::Authentication { message, .. } => message,
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
