//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router, GraphQL gateway and cookie decryptor against
//! a wiremock stand-in for the GitHub GraphQL endpoint.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use marginalia::{AccessToken, AesGcmTokenDecryptor, AppState, ServerSettings, router};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Cookie encryption key shared by the app and the tests.
pub const COOKIE_KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

/// Service token configured for anonymous reads and setup.
pub const SERVICE_TOKEN: &str = "ghp_service";

/// Settings pointing the app at `server`.
pub fn settings(server: &MockServer) -> ServerSettings {
    ServerSettings {
        bind_address: "127.0.0.1:0".parse().expect("bind address should parse"),
        api_base: Url::parse(&server.uri()).expect("mock server URI should parse"),
        request_timeout: Duration::from_secs(5),
        service_token: Some(AccessToken::new(SERVICE_TOKEN).expect("token should be valid")),
        cookie_key: COOKIE_KEY.to_vec(),
        default_category_name: "General".to_owned(),
        log_filter: "debug".to_owned(),
    }
}

/// Router wired to `server` through the production gateway.
pub fn app(server: &MockServer) -> Router {
    router(AppState::from_settings(settings(server)).expect("state should build"))
}

/// `Cookie` header value carrying `token` sealed with [`COOKIE_KEY`].
pub fn token_cookie(token: &str) -> String {
    let decryptor = AesGcmTokenDecryptor::new(COOKIE_KEY).expect("key should be valid");
    let sealed = decryptor
        .encrypt(&AccessToken::new(token).expect("token should be valid"))
        .expect("encryption should succeed");
    format!("github_token={sealed}")
}

/// Builds a request with an optional cookie and JSON body.
pub fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = cookie {
        builder = builder.header(header::COOKIE, value);
    }
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    builder
        .body(body.map_or_else(Body::empty, |text| Body::from(text.to_owned())))
        .expect("request should build")
}

/// Sends `request` through `app`, returning status and body text.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (
        status,
        String::from_utf8(bytes.to_vec()).expect("body should be UTF-8"),
    )
}

/// Mock answering GraphQL requests whose document names `operation`.
pub fn graphql_mock(operation: &str, data: serde_json::Value) -> Mock {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(operation))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": data })))
}

/// Received GraphQL requests whose document names `operation`.
pub async fn requests_for(server: &MockServer, operation: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|received| String::from_utf8_lossy(&received.body).contains(operation))
        .collect()
}

/// Variables object of a received GraphQL request.
pub fn variables(received: &wiremock::Request) -> serde_json::Value {
    let payload: serde_json::Value =
        serde_json::from_slice(&received.body).expect("request body should be JSON");
    payload
        .get("variables")
        .cloned()
        .unwrap_or(serde_json::Value::Null)
}
