//! GitHub Discussions access over GraphQL.
//!
//! This module wraps Octocrab to post GraphQL documents, decode the typed
//! `data` payloads, and expose the discussion operations the comment service
//! needs behind the [`DiscussionGateway`] trait. Provider failures are mapped
//! into [`crate::error::ServiceError`] variants that keep GitHub's status and
//! body for the HTTP layer to echo.

pub mod gateway;
pub mod graphql;
pub mod locator;
pub mod models;
pub mod queries;

pub use gateway::{DiscussionGateway, GraphQlDiscussionGateway};
pub use graphql::{GraphQlClient, GraphQlRequest, GraphQlTransport, OctocrabTransport, RawResponse};
pub use locator::{
    AccessToken, CategoryId, CommentId, DiscussionId, PageKey, RepositoryId, RepositoryLocator,
    RepositoryName, RepositoryOwner,
};
pub use models::{DiscussionCategory, DiscussionDraft, DiscussionSummary, StoredComment};

#[cfg(test)]
pub use gateway::MockDiscussionGateway;
