//! Create, list and resolve operations over page discussions.

use crate::error::ServiceError;
use crate::github::gateway::DiscussionGateway;
use crate::github::locator::{AccessToken, CommentId, PageKey, RepositoryLocator};
use crate::github::models::StoredComment;

use super::codec::{CommentBody, decode_body, encode_body};
use super::model::{Comment, NewComment, SetupIds};
use super::resolver::{DiscussionResolver, DiscussionTarget};

/// Comment operations built on a [`DiscussionGateway`].
pub struct CommentService<'gateway, Gateway>
where
    Gateway: DiscussionGateway + ?Sized,
{
    gateway: &'gateway Gateway,
}

impl<'gateway, Gateway> CommentService<'gateway, Gateway>
where
    Gateway: DiscussionGateway + ?Sized,
{
    /// Creates a service using the provided gateway.
    #[must_use]
    pub const fn new(gateway: &'gateway Gateway) -> Self {
        Self { gateway }
    }

    const fn resolver(&self) -> DiscussionResolver<'gateway, Gateway> {
        DiscussionResolver::new(self.gateway)
    }

    /// Adds an unresolved comment to the page's discussion, creating the
    /// discussion on first use.
    ///
    /// # Errors
    ///
    /// Propagates resolver, encoding and gateway failures.
    pub async fn create(
        &self,
        token: &AccessToken,
        target: &DiscussionTarget,
        page: &PageKey,
        new_comment: &NewComment,
    ) -> Result<CommentId, ServiceError> {
        let discussion = self.resolver().find_or_create(token, target, page).await?;
        let body = encode_body(&CommentBody {
            comment: new_comment.comment.clone(),
            page: page.as_str().to_owned(),
            context_before: new_comment.context_before.clone(),
            text: new_comment.text.clone(),
            context_after: new_comment.context_after.clone(),
            resolved: false,
        })?;
        let id = self.gateway.add_comment(token, &discussion, &body).await?;
        tracing::info!(comment = %id, discussion = %discussion, "comment created");
        Ok(id)
    }

    /// Lists the page's unresolved comments in creation order.
    ///
    /// Only the first fifty comments of the discussion are read.
    ///
    /// # Errors
    ///
    /// Propagates resolver and gateway failures.
    pub async fn list(
        &self,
        token: &AccessToken,
        target: &DiscussionTarget,
        page: &PageKey,
    ) -> Result<Vec<Comment>, ServiceError> {
        let discussion = self.resolver().find_or_create(token, target, page).await?;
        let stored = self.gateway.discussion_comments(token, &discussion).await?;
        Ok(stored
            .into_iter()
            .map(|comment| to_listed(comment, page))
            .filter(|comment| !comment.resolved)
            .collect())
    }

    /// Marks a comment resolved, preserving its message and metadata.
    ///
    /// This reads the body, rewrites it and writes it back with no
    /// precondition, so a concurrent edit between the read and the update is
    /// overwritten. Resolving an already resolved comment succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::CommentNotFound`] when the id does not name a
    /// discussion comment, or propagates gateway failures.
    pub async fn resolve(
        &self,
        token: &AccessToken,
        comment: &CommentId,
        page: &PageKey,
    ) -> Result<(), ServiceError> {
        let current = self
            .gateway
            .comment_body(token, comment)
            .await?
            .ok_or_else(|| ServiceError::CommentNotFound {
                id: comment.as_str().to_owned(),
            })?;
        let mut decoded = decode_body(&current, page.as_str());
        decoded.resolved = true;
        let updated = encode_body(&decoded)?;
        self.gateway.update_comment(token, comment, &updated).await?;
        tracing::info!(comment = %comment, "comment resolved");
        Ok(())
    }

    /// Looks up the category and repository ids an embedding needs.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::CategoryNotFound`] or
    /// [`ServiceError::RepositoryNotFound`], or propagates gateway failures.
    pub async fn setup(
        &self,
        token: &AccessToken,
        repository: &RepositoryLocator,
        category_name: &str,
    ) -> Result<SetupIds, ServiceError> {
        let resolver = self.resolver();
        let category_id = resolver.find_category(token, repository, category_name).await?;
        let repository_id = resolver.repository_id(token, repository).await?;
        Ok(SetupIds {
            category_id,
            repository_id,
        })
    }
}

fn to_listed(stored: StoredComment, page: &PageKey) -> Comment {
    let decoded = decode_body(&stored.body, page.as_str());
    Comment {
        id: stored.id,
        page: page.as_str().to_owned(),
        context_before: decoded.context_before,
        text: decoded.text,
        context_after: decoded.context_after,
        comment: decoded.comment,
        user: stored.author,
        resolved: decoded.resolved,
        created_at: stored.created_at,
    }
}
