//! Identity wrappers for repositories, pages, tokens and GraphQL node ids.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Prefix applied to a page key to form its discussion title.
pub const DISCUSSION_TITLE_PREFIX: &str = "Page: ";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidRequest`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, ServiceError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidRequest {
                message: "repository owner is required".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the name is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidRequest`] when the value is blank.
    pub fn new(value: &str) -> Result<Self, ServiceError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::InvalidRequest {
                message: "repository name is required".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Owner and name of the repository whose Discussions hold the comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    owner: RepositoryOwner,
    name: RepositoryName,
}

impl RepositoryLocator {
    /// Builds a locator from raw owner and repository strings.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidRequest`] when either part is blank.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, ServiceError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            name: RepositoryName::new(repo)?,
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }

    /// Search qualifier scoping a query to this repository.
    #[must_use]
    pub fn search_scope(&self) -> String {
        format!("repo:{}/{}", self.owner.as_str(), self.name.as_str())
    }
}

/// Key identifying the logical page a comment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey(String);

impl PageKey {
    /// Wraps a page key. Blank keys are rejected because they would all share
    /// the `Page: ` discussion.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidRequest`] when the key is blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ServiceError> {
        let raw = value.as_ref();
        if raw.trim().is_empty() {
            return Err(ServiceError::InvalidRequest {
                message: "page is required".to_owned(),
            });
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the page key.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Title of the discussion holding this page's comments.
    #[must_use]
    pub fn discussion_title(&self) -> String {
        format!("{DISCUSSION_TITLE_PREFIX}{}", self.0)
    }
}

/// Bearer token used to authenticate against GitHub.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ServiceError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ServiceError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(***)")
    }
}

macro_rules! node_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a GraphQL node id.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the node id.
            #[must_use]
            pub const fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(&self.0)
            }
        }
    };
}

node_id!(
    /// GraphQL node id of a repository.
    RepositoryId
);
node_id!(
    /// GraphQL node id of a discussion category.
    CategoryId
);
node_id!(
    /// GraphQL node id of a discussion.
    DiscussionId
);
node_id!(
    /// GraphQL node id of a discussion comment.
    CommentId
);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{AccessToken, PageKey, RepositoryLocator};
    use crate::error::ServiceError;

    #[rstest]
    fn discussion_title_prefixes_page() {
        let page = PageKey::new("/docs/intro").expect("page should be valid");
        assert_eq!(page.discussion_title(), "Page: /docs/intro");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_page_is_rejected(#[case] raw: &str) {
        assert!(matches!(
            PageKey::new(raw),
            Err(ServiceError::InvalidRequest { .. })
        ));
    }

    #[rstest]
    fn search_scope_names_owner_and_repo() {
        let locator =
            RepositoryLocator::from_owner_repo("acme", "docs").expect("locator should be valid");
        assert_eq!(locator.search_scope(), "repo:acme/docs");
    }

    #[rstest]
    fn token_is_trimmed_and_redacted() {
        let token = AccessToken::new("  ghp_secret \n").expect("token should be valid");
        assert_eq!(token.value(), "ghp_secret");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
    }

    #[rstest]
    fn blank_token_is_missing() {
        assert_eq!(AccessToken::new(" "), Err(ServiceError::MissingToken));
    }
}
