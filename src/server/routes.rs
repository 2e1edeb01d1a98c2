//! Route handlers.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::auth::{PermissionLevel, Viewer, authorize};
use crate::comments::{
    Comment, CommentService, DiscussionTarget, NewComment, ResolveRequest, SetupIds,
};
use crate::error::ServiceError;
use crate::github::locator::{AccessToken, CategoryId, PageKey, RepositoryId, RepositoryLocator};

use super::AppState;
use super::cookies::{TOKEN_COOKIE, cookie_value};

pub(super) fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/{org}/{repo}/{page}/comments",
            post(create_comment).get(list_comments).patch(resolve_comment),
        )
        .route("/{org}/{repo}/setup", post(setup_repository))
        .route("/{org}/permissions", post(check_permissions))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CommentQuery {
    category_id: Option<String>,
    repo_id: Option<String>,
    permission_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SetupQuery {
    category_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PermissionsRequest {
    #[serde(default)]
    user: Option<Viewer>,
    permission_level: PermissionLevel,
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ServiceError> {
    value
        .filter(|present| !present.trim().is_empty())
        .ok_or(ServiceError::MissingParameter { name })
}

fn parse_body<Body>(bytes: &[u8]) -> Result<Body, ServiceError>
where
    Body: DeserializeOwned,
{
    serde_json::from_slice(bytes).map_err(|error| {
        tracing::debug!(%error, "rejecting malformed request body");
        ServiceError::InvalidRequest {
            message: "Invalid request body".to_owned(),
        }
    })
}

fn caller_token(state: &AppState, headers: &HeaderMap) -> Result<AccessToken, ServiceError> {
    let sealed = cookie_value(headers, TOKEN_COOKIE).ok_or(ServiceError::MissingToken)?;
    state.decrypt_token(sealed)
}

impl CommentQuery {
    fn target(self, repository: RepositoryLocator) -> Result<DiscussionTarget, ServiceError> {
        let category_id = required(self.category_id, "category_id")?;
        let repository_id = required(self.repo_id, "repo_id")?;
        Ok(DiscussionTarget {
            repository,
            category_id: CategoryId::new(category_id),
            repository_id: RepositoryId::new(repository_id),
        })
    }

    fn permission_level(&self) -> Result<PermissionLevel, ServiceError> {
        self.permission_level
            .as_deref()
            .filter(|level| !level.is_empty())
            .map(str::parse)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

async fn create_comment(
    State(state): State<AppState>,
    Path((org, repo, page)): Path<(String, String, String)>,
    Query(query): Query<CommentQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    tracing::info!(%org, %repo, %page, "create comment requested");
    let token = caller_token(&state, &headers)?;
    let target = query.target(RepositoryLocator::from_owner_repo(&org, &repo)?)?;
    let page_key = PageKey::new(&page)?;
    let new_comment: NewComment = parse_body(&body)?;

    let id = CommentService::new(state.gateway())
        .create(&token, &target, &page_key, &new_comment)
        .await?;
    Ok((StatusCode::CREATED, Json(id)))
}

async fn list_comments(
    State(state): State<AppState>,
    Path((org, repo, page)): Path<(String, String, String)>,
    Query(query): Query<CommentQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Comment>>, ServiceError> {
    tracing::info!(%org, %repo, %page, "list comments requested");
    let level = query.permission_level()?;
    let token = if level == PermissionLevel::Anonymous {
        state.service_token()?
    } else {
        let Some(sealed) = cookie_value(&headers, TOKEN_COOKIE) else {
            tracing::info!(%level, "no token cookie; returning no comments");
            return Ok(Json(Vec::new()));
        };
        state.decrypt_token(sealed)?
    };
    let target = query.target(RepositoryLocator::from_owner_repo(&org, &repo)?)?;
    let page_key = PageKey::new(&page)?;

    if level == PermissionLevel::Team {
        let viewer = state.gateway().viewer(&token).await?;
        authorize(level, Some(&viewer), &org)?;
    }

    let comments = CommentService::new(state.gateway())
        .list(&token, &target, &page_key)
        .await?;
    Ok(Json(comments))
}

async fn resolve_comment(
    State(state): State<AppState>,
    Path((org, repo, page)): Path<(String, String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    tracing::info!(%org, %repo, %page, "resolve comment requested");
    let token = caller_token(&state, &headers)?;
    let page_key = PageKey::new(&page)?;
    let request: ResolveRequest = parse_body(&body)?;

    CommentService::new(state.gateway())
        .resolve(&token, &request.id, &page_key)
        .await?;
    Ok(Json(json!({ "status": "resolved" })))
}

async fn setup_repository(
    State(state): State<AppState>,
    Path((org, repo)): Path<(String, String)>,
    Query(query): Query<SetupQuery>,
) -> Result<Json<SetupIds>, ServiceError> {
    tracing::info!(%org, %repo, "setup requested");
    let token = state.service_token()?;
    let repository = RepositoryLocator::from_owner_repo(&org, &repo)?;
    let category_name = query
        .category_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| state.settings().default_category_name.clone());

    let ids = CommentService::new(state.gateway())
        .setup(&token, &repository, &category_name)
        .await?;
    Ok(Json(ids))
}

async fn check_permissions(
    Path(org): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ServiceError> {
    let request: PermissionsRequest = parse_body(&body)?;
    authorize(request.permission_level, request.user.as_ref(), &org)?;
    Ok(StatusCode::OK)
}
