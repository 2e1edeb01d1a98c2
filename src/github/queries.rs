//! GraphQL documents sent to GitHub.

/// Maximum search hits inspected when looking for a page's discussion.
pub const DISCUSSION_SEARCH_LIMIT: u32 = 5;

/// Maximum discussion categories inspected when resolving a category.
pub const CATEGORY_LIMIT: u32 = 20;

/// Maximum comments read from a discussion; there is no further pagination.
pub const COMMENT_LIMIT: u32 = 50;

pub(crate) const FIND_DISCUSSION: &str = r"
query FindDiscussion($query: String!, $first: Int!) {
  search(query: $query, type: DISCUSSION, first: $first) {
    nodes {
      ... on Discussion {
        id
        title
      }
    }
  }
}";

pub(crate) const CREATE_DISCUSSION: &str = r"
mutation CreateDiscussion($repoId: ID!, $title: String!, $body: String!, $categoryId: ID!) {
  createDiscussion(input: {
    repositoryId: $repoId,
    title: $title,
    body: $body,
    categoryId: $categoryId
  }) {
    discussion { id title }
  }
}";

pub(crate) const DISCUSSION_CATEGORIES: &str = r"
query GetDiscussionCategories($owner: String!, $repo: String!, $first: Int!) {
  repository(owner: $owner, name: $repo) {
    discussionCategories(first: $first) {
      nodes {
        id
        name
      }
    }
  }
}";

pub(crate) const REPOSITORY_ID: &str = r"
query GetRepositoryID($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    id
  }
}";

pub(crate) const DISCUSSION_COMMENTS: &str = r"
query GetDiscussionComments($discussionId: ID!, $first: Int!) {
  node(id: $discussionId) {
    ... on Discussion {
      comments(first: $first) {
        nodes {
          id
          body
          author {
            login
          }
          createdAt
        }
      }
    }
  }
}";

pub(crate) const ADD_COMMENT: &str = r"
mutation AddDiscussionComment($discussionId: ID!, $body: String!) {
  addDiscussionComment(input: { discussionId: $discussionId, body: $body }) {
    comment { id }
  }
}";

pub(crate) const COMMENT_BODY: &str = r"
query GetComment($id: ID!) {
  node(id: $id) {
    ... on DiscussionComment {
      id
      body
    }
  }
}";

pub(crate) const UPDATE_COMMENT: &str = r"
mutation UpdateComment($id: ID!, $body: String!) {
  updateDiscussionComment(input: { commentId: $id, body: $body }) {
    comment { id }
  }
}";

pub(crate) const VIEWER: &str = r"
query GetViewer {
  viewer {
    databaseId
    login
    email
    avatarUrl
    organizations(first: 100) {
      nodes {
        login
      }
    }
  }
}";
