//! Error types shared by the comment service and its HTTP surface.

use thiserror::Error;

/// Errors surfaced while validating requests or talking to GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No access token was supplied with the request.
    #[error("unauthorized: missing token")]
    MissingToken,

    /// The supplied token could not be decrypted or was blank.
    #[error("invalid token")]
    InvalidToken {
        /// Detail kept for logs; never echoed to callers.
        message: String,
    },

    /// The caller is not permitted to perform the operation.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Why the permission check rejected the caller.
        message: String,
    },

    /// GitHub rejected the token with a 401 or 403 response.
    #[error("GitHub rejected the token ({status}): {message}")]
    Authentication {
        /// HTTP status returned by GitHub.
        status: u16,
        /// Raw response body from GitHub.
        message: String,
    },

    /// GitHub answered with a non-200 status.
    #[error("GitHub API returned {status}: {message}")]
    Api {
        /// HTTP status returned by GitHub.
        status: u16,
        /// Raw response body from GitHub.
        message: String,
    },

    /// GitHub answered 200 but reported GraphQL errors.
    #[error("GitHub GraphQL error: {message}")]
    GraphQl {
        /// Joined GraphQL error messages.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// An outbound call did not finish within the configured timeout.
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// Operation that was cut short.
        operation: String,
        /// Configured timeout in seconds.
        seconds: u64,
    },

    /// A GitHub response could not be decoded.
    #[error("error decoding {operation} response: {message}")]
    Decode {
        /// Operation whose response was malformed.
        operation: String,
        /// Deserialisation error detail.
        message: String,
    },

    /// A comment body or request payload could not be serialised.
    #[error("error encoding {what}: {message}")]
    Encode {
        /// What was being encoded.
        what: String,
        /// Serialisation error detail.
        message: String,
    },

    /// The repository does not exist or is not visible to the token.
    #[error("repository not found: {owner}/{repo}")]
    RepositoryNotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
    },

    /// The requested discussion category does not exist.
    #[error("category {name} not found (must be created manually)")]
    CategoryNotFound {
        /// Category name that was searched for.
        name: String,
    },

    /// No discussion comment exists with the given id.
    #[error("comment not found: {id}")]
    CommentNotFound {
        /// Comment node id.
        id: String,
    },

    /// A required query parameter was absent or blank.
    #[error("Missing ?{name}= query parameter")]
    MissingParameter {
        /// Query parameter name.
        name: &'static str,
    },

    /// The request body or a request value was malformed.
    #[error("{message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },

    /// A URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
