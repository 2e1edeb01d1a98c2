//! Behavioural tests for creating, listing and resolving page comments.

mod support {
    #[path = "../support/mod.rs"]
    #[expect(dead_code, reason = "route-level helpers are shared with comment_routes")]
    mod common;

    pub use common::{app, graphql_mock, request, requests_for, send, token_cookie};
}

#[path = "comment_lifecycle_bdd/harness.rs"]
mod comment_lifecycle_bdd_harness;

use std::io;

use axum::http::StatusCode;
use marginalia::comments::{CommentBody, encode_body};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};
use wiremock::MockServer;

use comment_lifecycle_bdd_harness::{GitHubHarness, harness};
use support::{app, graphql_mock, request, requests_for, send, token_cookie};

#[derive(ScenarioState, Default)]
struct LifecycleState {
    github: Slot<GitHubHarness>,
    responses: Slot<Vec<(StatusCode, String)>>,
    listed: Slot<Vec<String>>,
}

#[fixture]
fn lifecycle_state() -> LifecycleState {
    LifecycleState::default()
}

fn missing(what: &str) -> io::Error {
    io::Error::other(format!("{what} not initialised"))
}

fn with_server<T>(
    state: &LifecycleState,
    action: impl FnOnce(&GitHubHarness, &MockServer) -> T,
) -> Result<T, io::Error> {
    let github = harness(&state.github)?;
    Ok(action(&github, github.server()))
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a GitHub repository with no discussion for page {page}")]
fn seed_empty_repository(lifecycle_state: &LifecycleState, page: String) -> Result<(), io::Error> {
    let title = format!("Page: {page}");
    with_server(lifecycle_state, |github, server| {
        github.block_on(async {
            graphql_mock("FindDiscussion", json!({ "search": { "nodes": [] } }))
                .up_to_n_times(1)
                .mount(server)
                .await;
            graphql_mock(
                "FindDiscussion",
                json!({ "search": { "nodes": [ { "id": "D_page", "title": title } ] } }),
            )
            .mount(server)
            .await;
            graphql_mock(
                "CreateDiscussion",
                json!({ "createDiscussion": { "discussion": { "id": "D_page", "title": title } } }),
            )
            .mount(server)
            .await;
            graphql_mock(
                "AddDiscussionComment",
                json!({ "addDiscussionComment": { "comment": { "id": "DC_new" } } }),
            )
            .mount(server)
            .await;
        });
    })
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a GitHub repository whose page {page} has comments resolved {flags}")]
fn seed_commented_page(
    lifecycle_state: &LifecycleState,
    page: String,
    flags: String,
) -> Result<(), io::Error> {
    let mut nodes = Vec::new();
    for (index, flag) in flags.split(',').map(str::trim).enumerate() {
        let body = encode_body(&CommentBody {
            comment: format!("comment {}", index + 1),
            page: page.clone(),
            resolved: flag == "true",
            ..CommentBody::default()
        })
        .map_err(io::Error::other)?;
        nodes.push(json!({
            "id": format!("DC_{}", index + 1),
            "body": body,
            "author": { "login": "reviewer" },
            "createdAt": "2025-01-01T00:00:00Z"
        }));
    }
    let title = format!("Page: {page}");
    with_server(lifecycle_state, |github, server| {
        github.block_on(async {
            graphql_mock(
                "FindDiscussion",
                json!({ "search": { "nodes": [ { "id": "D_page", "title": title } ] } }),
            )
            .mount(server)
            .await;
            graphql_mock(
                "GetDiscussionComments",
                json!({ "node": { "comments": { "nodes": nodes } } }),
            )
            .mount(server)
            .await;
        });
    })
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("a reader comments {message} on page {page}")]
fn post_comment(
    lifecycle_state: &LifecycleState,
    message: String,
    page: String,
) -> Result<(), io::Error> {
    let cookie = token_cookie("gho_reader");
    let uri = format!("/acme/docs/{page}/comments?category_id=C_1&repo_id=R_1");
    let payload = json!({ "comment": message, "text": "anchor" }).to_string();
    let response = with_server(lifecycle_state, |github, server| {
        github.block_on(send(
            app(server),
            request("POST", &uri, Some(&cookie), Some(&payload)),
        ))
    })?;
    let mut responses = lifecycle_state.responses.take().unwrap_or_default();
    responses.push(response);
    lifecycle_state.responses.set(responses);
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("a reader lists comments on page {page}")]
fn list_comments(lifecycle_state: &LifecycleState, page: String) -> Result<(), io::Error> {
    let cookie = token_cookie("gho_reader");
    let uri = format!("/acme/docs/{page}/comments?category_id=C_1&repo_id=R_1&permission_level=auth");
    let (status, body) = with_server(lifecycle_state, |github, server| {
        github.block_on(send(app(server), request("GET", &uri, Some(&cookie), None)))
    })?;
    if status != StatusCode::OK {
        return Err(io::Error::other(format!("listing failed with {status}: {body}")));
    }
    let listed: Vec<Value> = serde_json::from_str(&body).map_err(io::Error::other)?;
    lifecycle_state.listed.set(
        listed
            .iter()
            .filter_map(|comment| comment.get("id").and_then(Value::as_str))
            .map(str::to_owned)
            .collect(),
    );
    Ok(())
}

#[then("the reader receives a created comment id")]
fn assert_created(lifecycle_state: &LifecycleState) -> Result<(), io::Error> {
    let responses = lifecycle_state
        .responses
        .with_ref(Clone::clone)
        .ok_or_else(|| missing("responses"))?;
    match responses.last() {
        Some((StatusCode::CREATED, body)) if body == "\"DC_new\"" => Ok(()),
        other => Err(io::Error::other(format!("unexpected response {other:?}"))),
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("GitHub received {count:usize} {operation} requests")]
fn assert_operation_count(
    lifecycle_state: &LifecycleState,
    count: usize,
    operation: String,
) -> Result<(), io::Error> {
    let actual = with_server(lifecycle_state, |github, server| {
        github.block_on(requests_for(server, &operation)).len()
    })?;
    if actual == count {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "expected {count} {operation} requests but found {actual}"
        )))
    }
}

#[then("{count:usize} comments are listed")]
fn assert_listed_count(lifecycle_state: &LifecycleState, count: usize) -> Result<(), io::Error> {
    let actual = lifecycle_state
        .listed
        .with_ref(Vec::len)
        .ok_or_else(|| missing("listing"))?;
    if actual == count {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "expected {count} comments but found {actual}"
        )))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the listed comments are {ids}")]
fn assert_listed_ids(lifecycle_state: &LifecycleState, ids: String) -> Result<(), io::Error> {
    let expected: Vec<String> = ids.split(',').map(|id| id.trim().to_owned()).collect();
    let actual = lifecycle_state
        .listed
        .with_ref(Clone::clone)
        .ok_or_else(|| missing("listing"))?;
    if actual == expected {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "expected comments {expected:?} but found {actual:?}"
        )))
    }
}

#[scenario(path = "tests/features/comment_lifecycle.feature", index = 0)]
fn first_comment_creates_discussion(lifecycle_state: LifecycleState) {
    let _ = lifecycle_state;
}

#[scenario(path = "tests/features/comment_lifecycle.feature", index = 1)]
fn later_comments_reuse_discussion(lifecycle_state: LifecycleState) {
    let _ = lifecycle_state;
}

#[scenario(path = "tests/features/comment_lifecycle.feature", index = 2)]
fn resolved_comments_are_hidden(lifecycle_state: LifecycleState) {
    let _ = lifecycle_state;
}
