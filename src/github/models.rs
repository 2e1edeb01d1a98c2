//! Data models returned by the Discussions gateway.
//!
//! Types prefixed with `Api` are internal deserialisation targets for GraphQL
//! `data` payloads; they convert into the public domain types below.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::locator::{CategoryId, CommentId, DiscussionId, RepositoryId};
use crate::auth::Viewer;

/// Search hit for a discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionSummary {
    /// Discussion node id.
    pub id: DiscussionId,
    /// Discussion title.
    pub title: String,
}

/// Input for creating a discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionDraft {
    /// Repository that will own the discussion.
    pub repository_id: RepositoryId,
    /// Category the discussion is filed under.
    pub category_id: CategoryId,
    /// Discussion title.
    pub title: String,
    /// Opening post body.
    pub body: String,
}

/// Discussion category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionCategory {
    /// Category node id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

/// Discussion comment as stored on GitHub, body still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredComment {
    /// Comment node id.
    pub id: CommentId,
    /// Markdown body.
    pub body: String,
    /// Author login, absent for deleted accounts.
    pub author: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiConnection<Node> {
    #[serde(default = "Vec::new")]
    pub(super) nodes: Vec<Option<Node>>,
}

impl<Node> ApiConnection<Node> {
    pub(super) fn into_nodes(self) -> impl Iterator<Item = Node> {
        self.nodes.into_iter().flatten()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiSearchData {
    pub(super) search: ApiConnection<ApiDiscussion>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiDiscussion {
    #[serde(default)]
    pub(super) id: Option<String>,
    #[serde(default)]
    pub(super) title: Option<String>,
}

impl ApiDiscussion {
    /// Search can return non-discussion nodes as empty objects; those have no
    /// id and are skipped.
    pub(super) fn into_summary(self) -> Option<DiscussionSummary> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(DiscussionSummary {
            id: DiscussionId::new(id),
            title: self.title.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiCreateDiscussionData {
    pub(super) create_discussion: ApiCreateDiscussionPayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCreateDiscussionPayload {
    pub(super) discussion: ApiDiscussion,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCategoriesData {
    pub(super) repository: Option<ApiCategoriesRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiCategoriesRepository {
    pub(super) discussion_categories: ApiConnection<ApiCategory>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCategory {
    pub(super) id: String,
    pub(super) name: String,
}

impl From<ApiCategory> for DiscussionCategory {
    fn from(value: ApiCategory) -> Self {
        Self {
            id: CategoryId::new(value.id),
            name: value.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiRepositoryData {
    pub(super) repository: Option<ApiRepository>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiRepository {
    #[serde(default)]
    pub(super) id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiDiscussionCommentsData {
    pub(super) node: Option<ApiCommentsDiscussion>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCommentsDiscussion {
    #[serde(default)]
    pub(super) comments: Option<ApiConnection<ApiDiscussionComment>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiDiscussionComment {
    pub(super) id: String,
    #[serde(default)]
    pub(super) body: String,
    pub(super) author: Option<ApiActor>,
    pub(super) created_at: Option<DateTime<Utc>>,
}

impl From<ApiDiscussionComment> for StoredComment {
    fn from(value: ApiDiscussionComment) -> Self {
        Self {
            id: CommentId::new(value.id),
            body: value.body,
            author: value.author.and_then(|actor| actor.login),
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiActor {
    pub(super) login: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiAddCommentData {
    pub(super) add_discussion_comment: ApiCommentPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiUpdateCommentData {
    pub(super) update_discussion_comment: ApiCommentPayload,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCommentPayload {
    pub(super) comment: ApiCommentRef,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCommentRef {
    pub(super) id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCommentBodyData {
    pub(super) node: Option<ApiCommentBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiCommentBody {
    #[serde(default)]
    pub(super) id: Option<String>,
    #[serde(default)]
    pub(super) body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiViewerData {
    pub(super) viewer: ApiViewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiViewer {
    pub(super) database_id: Option<i64>,
    pub(super) login: String,
    #[serde(default)]
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) avatar_url: Option<String>,
    pub(super) organizations: ApiConnection<ApiOrganization>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiOrganization {
    pub(super) login: String,
}

impl From<ApiViewer> for Viewer {
    fn from(value: ApiViewer) -> Self {
        Self {
            id: value.database_id.unwrap_or_default(),
            name: value.login,
            email: value.email.unwrap_or_default(),
            avatar_url: value.avatar_url.unwrap_or_default(),
            organization_logins: value
                .organizations
                .into_nodes()
                .map(|organization| organization.login)
                .collect(),
        }
    }
}
