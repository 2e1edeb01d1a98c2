//! Locates the discussion, category and repository backing a page.

use crate::error::ServiceError;
use crate::github::gateway::DiscussionGateway;
use crate::github::locator::{
    AccessToken, CategoryId, DiscussionId, PageKey, RepositoryId, RepositoryLocator,
};
use crate::github::models::DiscussionDraft;

/// Repository and category a page's discussion lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionTarget {
    /// Repository holding the discussions.
    pub repository: RepositoryLocator,
    /// Category new discussions are filed under.
    pub category_id: CategoryId,
    /// Node id of `repository`.
    pub repository_id: RepositoryId,
}

/// Finds or lazily creates discussions keyed by page title.
///
/// Find-or-create is a search followed by a create with no lock in between,
/// so two concurrent first comments on a page can each create a discussion.
pub struct DiscussionResolver<'gateway, Gateway>
where
    Gateway: DiscussionGateway + ?Sized,
{
    gateway: &'gateway Gateway,
}

impl<'gateway, Gateway> DiscussionResolver<'gateway, Gateway>
where
    Gateway: DiscussionGateway + ?Sized,
{
    /// Creates a resolver over the provided gateway.
    #[must_use]
    pub const fn new(gateway: &'gateway Gateway) -> Self {
        Self { gateway }
    }

    /// Returns the id of the discussion titled `Page: <page>`, creating it
    /// when no exact title match exists.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures from the search or the create call.
    pub async fn find_or_create(
        &self,
        token: &AccessToken,
        target: &DiscussionTarget,
        page: &PageKey,
    ) -> Result<DiscussionId, ServiceError> {
        let title = page.discussion_title();
        let query = format!("{} in:title \"{title}\"", target.repository.search_scope());

        let candidates = self
            .gateway
            .search_discussions(token, &query)
            .await
            .inspect_err(|error| tracing::warn!(%error, page = page.as_str(), "discussion search failed"))?;

        if let Some(existing) = candidates.into_iter().find(|hit| hit.title == title) {
            tracing::debug!(discussion = %existing.id, page = page.as_str(), "reusing discussion");
            return Ok(existing.id);
        }

        let draft = DiscussionDraft {
            repository_id: target.repository_id.clone(),
            category_id: target.category_id.clone(),
            title,
            body: format!("Discussion for comments on {}", page.as_str()),
        };
        let created = self
            .gateway
            .create_discussion(token, &draft)
            .await
            .inspect_err(|error| tracing::warn!(%error, page = page.as_str(), "discussion create failed"))?;
        tracing::info!(discussion = %created, page = page.as_str(), "created discussion");
        Ok(created)
    }

    /// Returns the id of the category named exactly `name`.
    ///
    /// Categories cannot be created through the API, so a missing category is
    /// an error rather than something to create.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::CategoryNotFound`] when no category matches, or
    /// propagates gateway failures.
    pub async fn find_category(
        &self,
        token: &AccessToken,
        repository: &RepositoryLocator,
        name: &str,
    ) -> Result<CategoryId, ServiceError> {
        self.gateway
            .discussion_categories(token, repository)
            .await?
            .into_iter()
            .find(|category| category.name == name)
            .map(|category| category.id)
            .ok_or_else(|| ServiceError::CategoryNotFound {
                name: name.to_owned(),
            })
    }

    /// Returns the repository's node id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::RepositoryNotFound`] when GitHub returns no id,
    /// or propagates gateway failures.
    pub async fn repository_id(
        &self,
        token: &AccessToken,
        repository: &RepositoryLocator,
    ) -> Result<RepositoryId, ServiceError> {
        self.gateway
            .repository_id(token, repository)
            .await?
            .filter(|id| !id.as_str().is_empty())
            .ok_or_else(|| ServiceError::RepositoryNotFound {
                owner: repository.owner().as_str().to_owned(),
                repo: repository.name().as_str().to_owned(),
            })
    }
}
