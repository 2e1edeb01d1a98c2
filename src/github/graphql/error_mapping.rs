//! Error mapping helpers for the GitHub GraphQL transport.

use http::StatusCode;

use crate::error::ServiceError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ServiceError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(operation, source.status_code, source.message.clone());
    }

    if is_network_error(error) {
        return ServiceError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ServiceError::Decode {
        operation: operation.to_owned(),
        message: error.to_string(),
    }
}

/// Maps a non-200 GraphQL response, echoing the raw body to aid debugging.
pub(super) fn map_http_error(operation: &str, status: StatusCode, body: String) -> ServiceError {
    tracing::warn!(operation, status = status.as_u16(), "GitHub returned a non-200 status");
    if is_auth_failure(status) {
        ServiceError::Authentication {
            status: status.as_u16(),
            message: body,
        }
    } else {
        ServiceError::Api {
            status: status.as_u16(),
            message: body,
        }
    }
}
