//! Marginalia library crate: page comments stored in GitHub Discussions.
//!
//! Each commented page maps to one discussion titled `Page: <page>` and each
//! comment is a reply whose body carries its anchor metadata in a fenced JSON
//! block. The library exposes the comment codec and operations, the GitHub
//! GraphQL gateway they run on, the permission evaluator, and the axum HTTP
//! surface served by the `marginalia` binary.

pub mod auth;
pub mod comments;
pub mod config;
pub mod error;
pub mod github;
pub mod server;

pub use auth::{AesGcmTokenDecryptor, PermissionDecision, PermissionLevel, TokenDecryptor, Viewer};
pub use comments::{Comment, CommentService, DiscussionResolver, DiscussionTarget, NewComment};
pub use config::{MarginaliaConfig, ServerSettings};
pub use error::ServiceError;
pub use github::{
    AccessToken, DiscussionGateway, GraphQlDiscussionGateway, OctocrabTransport, PageKey,
    RepositoryLocator,
};
pub use server::{AppState, router, serve};
