//! Cookie header parsing.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Cookie carrying the encrypted GitHub token.
pub const TOKEN_COOKIE: &str = "github_token";

/// Returns the value of the first cookie named `name`, if any.
pub(super) fn cookie_value<'headers>(headers: &'headers HeaderMap, name: &str) -> Option<&'headers str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
}
