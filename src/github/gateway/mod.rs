//! Gateway for reading and writing GitHub Discussions.
//!
//! [`DiscussionGateway`] is the seam the comment service depends on; the
//! GraphQL implementation issues one request per method and tests substitute
//! the generated mock.

use async_trait::async_trait;
use serde_json::json;

use crate::auth::Viewer;
use crate::error::ServiceError;
use crate::github::graphql::{GraphQlClient, GraphQlRequest, GraphQlTransport};
use crate::github::locator::{AccessToken, CommentId, DiscussionId, RepositoryId, RepositoryLocator};
use crate::github::models::{
    ApiAddCommentData, ApiCategoriesData, ApiCommentBodyData, ApiCreateDiscussionData,
    ApiDiscussionCommentsData, ApiRepositoryData, ApiSearchData, ApiUpdateCommentData,
    ApiViewerData, DiscussionCategory, DiscussionDraft, DiscussionSummary, StoredComment,
};
use crate::github::queries::{
    ADD_COMMENT, CATEGORY_LIMIT, COMMENT_BODY, COMMENT_LIMIT, CREATE_DISCUSSION,
    DISCUSSION_CATEGORIES, DISCUSSION_COMMENTS, DISCUSSION_SEARCH_LIMIT, FIND_DISCUSSION,
    REPOSITORY_ID, UPDATE_COMMENT, VIEWER,
};

/// Discussion operations used by the comment service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionGateway: Send + Sync {
    /// Runs a discussion search and returns up to five hits.
    async fn search_discussions(
        &self,
        token: &AccessToken,
        query: &str,
    ) -> Result<Vec<DiscussionSummary>, ServiceError>;

    /// Creates a discussion and returns its node id.
    async fn create_discussion(
        &self,
        token: &AccessToken,
        draft: &DiscussionDraft,
    ) -> Result<DiscussionId, ServiceError>;

    /// Lists the first twenty discussion categories of a repository.
    async fn discussion_categories(
        &self,
        token: &AccessToken,
        repository: &RepositoryLocator,
    ) -> Result<Vec<DiscussionCategory>, ServiceError>;

    /// Looks up a repository node id; `None` when GitHub returns no id.
    async fn repository_id(
        &self,
        token: &AccessToken,
        repository: &RepositoryLocator,
    ) -> Result<Option<RepositoryId>, ServiceError>;

    /// Reads the first fifty comments of a discussion in creation order.
    async fn discussion_comments(
        &self,
        token: &AccessToken,
        discussion: &DiscussionId,
    ) -> Result<Vec<StoredComment>, ServiceError>;

    /// Appends a comment to a discussion and returns the new comment id.
    async fn add_comment(
        &self,
        token: &AccessToken,
        discussion: &DiscussionId,
        body: &str,
    ) -> Result<CommentId, ServiceError>;

    /// Reads a comment body; `None` when no discussion comment has that id.
    async fn comment_body(
        &self,
        token: &AccessToken,
        comment: &CommentId,
    ) -> Result<Option<String>, ServiceError>;

    /// Replaces a comment body.
    async fn update_comment(
        &self,
        token: &AccessToken,
        comment: &CommentId,
        body: &str,
    ) -> Result<(), ServiceError>;

    /// Fetches the identity behind a token.
    async fn viewer(&self, token: &AccessToken) -> Result<Viewer, ServiceError>;
}

/// [`DiscussionGateway`] backed by the GitHub GraphQL API.
pub struct GraphQlDiscussionGateway<Transport> {
    client: GraphQlClient<Transport>,
}

impl<Transport> GraphQlDiscussionGateway<Transport>
where
    Transport: GraphQlTransport,
{
    /// Creates a gateway sending requests through `transport`.
    #[must_use]
    pub const fn new(transport: Transport) -> Self {
        Self {
            client: GraphQlClient::new(transport),
        }
    }
}

#[async_trait]
impl<Transport> DiscussionGateway for GraphQlDiscussionGateway<Transport>
where
    Transport: GraphQlTransport,
{
    async fn search_discussions(
        &self,
        token: &AccessToken,
        query: &str,
    ) -> Result<Vec<DiscussionSummary>, ServiceError> {
        let request = GraphQlRequest::new(
            "search discussions",
            FIND_DISCUSSION,
            json!({ "query": query, "first": DISCUSSION_SEARCH_LIMIT }),
        );
        let data: ApiSearchData = self.client.send(token, &request).await?;
        Ok(data
            .search
            .into_nodes()
            .filter_map(|node| node.into_summary())
            .collect())
    }

    async fn create_discussion(
        &self,
        token: &AccessToken,
        draft: &DiscussionDraft,
    ) -> Result<DiscussionId, ServiceError> {
        let request = GraphQlRequest::new(
            "create discussion",
            CREATE_DISCUSSION,
            json!({
                "repoId": draft.repository_id.as_str(),
                "title": draft.title,
                "body": draft.body,
                "categoryId": draft.category_id.as_str(),
            }),
        );
        let data: ApiCreateDiscussionData = self.client.send(token, &request).await?;
        data.create_discussion
            .discussion
            .into_summary()
            .map(|summary| summary.id)
            .ok_or_else(|| ServiceError::Decode {
                operation: request.operation.to_owned(),
                message: "created discussion has no id".to_owned(),
            })
    }

    async fn discussion_categories(
        &self,
        token: &AccessToken,
        repository: &RepositoryLocator,
    ) -> Result<Vec<DiscussionCategory>, ServiceError> {
        let request = GraphQlRequest::new(
            "list discussion categories",
            DISCUSSION_CATEGORIES,
            json!({
                "owner": repository.owner().as_str(),
                "repo": repository.name().as_str(),
                "first": CATEGORY_LIMIT,
            }),
        );
        let data: ApiCategoriesData = self.client.send(token, &request).await?;
        Ok(data
            .repository
            .map(|found| {
                found
                    .discussion_categories
                    .into_nodes()
                    .map(DiscussionCategory::from)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn repository_id(
        &self,
        token: &AccessToken,
        repository: &RepositoryLocator,
    ) -> Result<Option<RepositoryId>, ServiceError> {
        let request = GraphQlRequest::new(
            "repository id",
            REPOSITORY_ID,
            json!({
                "owner": repository.owner().as_str(),
                "repo": repository.name().as_str(),
            }),
        );
        let data: ApiRepositoryData = self.client.send(token, &request).await?;
        Ok(data
            .repository
            .and_then(|found| found.id)
            .filter(|id| !id.is_empty())
            .map(RepositoryId::new))
    }

    async fn discussion_comments(
        &self,
        token: &AccessToken,
        discussion: &DiscussionId,
    ) -> Result<Vec<StoredComment>, ServiceError> {
        let request = GraphQlRequest::new(
            "list discussion comments",
            DISCUSSION_COMMENTS,
            json!({ "discussionId": discussion.as_str(), "first": COMMENT_LIMIT }),
        );
        let data: ApiDiscussionCommentsData = self.client.send(token, &request).await?;
        let Some(comments) = data.node.and_then(|node| node.comments) else {
            tracing::warn!(discussion = %discussion, "discussion node missing; no comments read");
            return Ok(Vec::new());
        };
        Ok(comments.into_nodes().map(StoredComment::from).collect())
    }

    async fn add_comment(
        &self,
        token: &AccessToken,
        discussion: &DiscussionId,
        body: &str,
    ) -> Result<CommentId, ServiceError> {
        let request = GraphQlRequest::new(
            "add discussion comment",
            ADD_COMMENT,
            json!({ "discussionId": discussion.as_str(), "body": body }),
        );
        let data: ApiAddCommentData = self.client.send(token, &request).await?;
        Ok(CommentId::new(data.add_discussion_comment.comment.id))
    }

    async fn comment_body(
        &self,
        token: &AccessToken,
        comment: &CommentId,
    ) -> Result<Option<String>, ServiceError> {
        let request = GraphQlRequest::new(
            "get comment",
            COMMENT_BODY,
            json!({ "id": comment.as_str() }),
        );
        let data: ApiCommentBodyData = self.client.send(token, &request).await?;
        Ok(data
            .node
            .filter(|node| node.id.is_some())
            .and_then(|node| node.body))
    }

    async fn update_comment(
        &self,
        token: &AccessToken,
        comment: &CommentId,
        body: &str,
    ) -> Result<(), ServiceError> {
        let request = GraphQlRequest::new(
            "update comment",
            UPDATE_COMMENT,
            json!({ "id": comment.as_str(), "body": body }),
        );
        let data: ApiUpdateCommentData = self.client.send(token, &request).await?;
        tracing::debug!(comment = %data.update_discussion_comment.comment.id, "comment updated");
        Ok(())
    }

    async fn viewer(&self, token: &AccessToken) -> Result<Viewer, ServiceError> {
        let request = GraphQlRequest::new("viewer", VIEWER, json!({}));
        let data: ApiViewerData = self.client.send(token, &request).await?;
        Ok(data.viewer.into())
    }
}
