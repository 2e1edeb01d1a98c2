//! Wire shapes exchanged with the embedding client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::locator::{CategoryId, CommentId, RepositoryId};

/// Comment as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Discussion comment node id.
    pub id: CommentId,
    /// Page the comment was listed for.
    pub page: String,
    /// Text immediately preceding the anchor.
    pub context_before: String,
    /// Anchored text.
    pub text: String,
    /// Text immediately following the anchor.
    pub context_after: String,
    /// Free-form message.
    pub comment: String,
    /// Login of the author, when GitHub still knows them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Whether the comment has been resolved.
    pub resolved: bool,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a create request.
///
/// Missing fields default to empty strings; any client-supplied `id` is
/// ignored because GitHub assigns comment ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewComment {
    /// Text immediately preceding the anchor.
    pub context_before: String,
    /// Anchored text.
    pub text: String,
    /// Text immediately following the anchor.
    pub context_after: String,
    /// Free-form message.
    pub comment: String,
}

/// Body of a resolve request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolveRequest {
    /// Comment to resolve.
    pub id: CommentId,
}

/// Identifiers returned by repository setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupIds {
    /// Discussion category comments are filed under.
    #[serde(rename = "CategoryId")]
    pub category_id: CategoryId,
    /// Repository node id.
    #[serde(rename = "RepositoryId")]
    pub repository_id: RepositoryId,
}
