//! Comment body encoding.
//!
//! A stored comment body is the human-readable message followed by a fenced
//! `json` block carrying the anchor metadata:
//!
//! ````text
//! Looks off by one.
//!
//! ```json
//! {
//!   "contextBefore": "...",
//!   "text": "...",
//!   "contextAfter": "...",
//!   "page": "/docs/intro",
//!   "resolved": "false"
//! }
//! ```
//! ````
//!
//! Every metadata value is a string; a repeated key keeps its last value and
//! non-string values are skipped. Decoding never fails: bodies without a
//! well-formed block fall back to treating the whole body as the message.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ServiceError;

/// Opening marker of the metadata block.
pub const METADATA_OPEN: &str = "```json";

/// Closing marker of the metadata block.
pub const METADATA_CLOSE: &str = "```";

/// Decoded fields of a comment body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBody {
    /// Free-form message written by the commenter.
    pub comment: String,
    /// Page key the comment belongs to.
    pub page: String,
    /// Text immediately preceding the anchor.
    pub context_before: String,
    /// Anchored text.
    pub text: String,
    /// Text immediately following the anchor.
    pub context_after: String,
    /// Whether the comment has been resolved.
    pub resolved: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodedMetadata<'body> {
    context_before: &'body str,
    text: &'body str,
    context_after: &'body str,
    page: &'body str,
    resolved: &'static str,
}

/// Metadata keys as stored; a repeated key keeps its last value.
type StoredMetadata = BTreeMap<String, Value>;

fn overlay(metadata: &StoredMetadata, decoded: &mut CommentBody) {
    let string_value = |key: &str| -> Option<String> {
        match metadata.get(key)? {
            Value::String(value) => Some(value.clone()),
            other => {
                tracing::warn!(key, value = %other, "ignoring non-string comment metadata value");
                None
            }
        }
    };

    if let Some(page) = string_value("page") {
        decoded.page = page;
    }
    if let Some(context_before) = string_value("contextBefore") {
        decoded.context_before = context_before;
    }
    if let Some(value) = string_value("text") {
        decoded.text = value;
    }
    if let Some(context_after) = string_value("contextAfter") {
        decoded.context_after = context_after;
    }
    if let Some(resolved) = string_value("resolved") {
        decoded.resolved = parse_flag(&resolved);
    }
}

/// Renders a comment as a markdown body with a trailing metadata block.
///
/// # Errors
///
/// Returns [`ServiceError::Encode`] if the metadata cannot be serialised.
pub fn encode_body(body: &CommentBody) -> Result<String, ServiceError> {
    let metadata = EncodedMetadata {
        context_before: &body.context_before,
        text: &body.text,
        context_after: &body.context_after,
        page: &body.page,
        resolved: if body.resolved { "true" } else { "false" },
    };
    let json = serde_json::to_string_pretty(&metadata).map_err(|error| ServiceError::Encode {
        what: "comment metadata".to_owned(),
        message: error.to_string(),
    })?;
    Ok(format!(
        "{}\n\n{METADATA_OPEN}\n{json}\n{METADATA_CLOSE}",
        body.comment
    ))
}

/// Recovers comment fields from a stored body.
///
/// `page` is the default for the `page` field; a `page` key in the metadata
/// block takes precedence.
#[must_use]
pub fn decode_body(body: &str, page: &str) -> CommentBody {
    let mut decoded = CommentBody {
        comment: body.trim().to_owned(),
        page: page.to_owned(),
        ..CommentBody::default()
    };

    let Some(open) = body.find(METADATA_OPEN) else {
        return decoded;
    };
    let after_open = body.get(open + METADATA_OPEN.len()..).unwrap_or_default();
    let Some(close) = after_open.find(METADATA_CLOSE) else {
        return decoded;
    };
    let inner = after_open.get(..close).unwrap_or_default().trim();

    match serde_json::from_str::<StoredMetadata>(inner) {
        Ok(metadata) => overlay(&metadata, &mut decoded),
        Err(error) => {
            tracing::warn!(%error, "comment metadata block is not valid JSON; using defaults");
        }
    }

    body.get(..open)
        .unwrap_or_default()
        .trim()
        .clone_into(&mut decoded.comment);
    decoded
}

/// Parses a boolean the way hand-edited metadata tends to spell it.
///
/// Unrecognised values read as `false`.
fn parse_flag(value: &str) -> bool {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
        "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
        other => {
            tracing::warn!(value = other, "unrecognised resolved flag; treating as false");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{CommentBody, decode_body, encode_body, parse_flag};

    #[fixture]
    fn sample() -> CommentBody {
        CommentBody {
            comment: "Looks off by one.".to_owned(),
            page: "/docs/intro".to_owned(),
            context_before: "for i in ".to_owned(),
            text: "0..=len".to_owned(),
            context_after: " {".to_owned(),
            resolved: false,
        }
    }

    #[rstest]
    fn encode_renders_message_then_metadata(sample: CommentBody) {
        let body = encode_body(&sample).expect("encoding should succeed");

        insta::assert_snapshot!(body, @r#"
        Looks off by one.

        ```json
        {
          "contextBefore": "for i in ",
          "text": "0..=len",
          "contextAfter": " {",
          "page": "/docs/intro",
          "resolved": "false"
        }
        ```
        "#);
    }

    #[rstest]
    fn decode_recovers_encoded_fields(sample: CommentBody) {
        let body = encode_body(&sample).expect("encoding should succeed");

        assert_eq!(decode_body(&body, "/docs/intro"), sample);
    }

    #[rstest]
    fn markup_characters_are_written_literally() {
        let comment = CommentBody {
            comment: "see <b>".to_owned(),
            text: "a < b && c > d".to_owned(),
            ..CommentBody::default()
        };
        let body = encode_body(&comment).expect("encoding should succeed");

        assert!(body.contains("\"text\": \"a < b && c > d\""), "body was {body}");
        assert_eq!(decode_body(&body, ""), comment);
    }

    #[rstest]
    #[case::no_fence("  just a note  ")]
    #[case::unterminated("just a note\n\n```json\n{\"resolved\": \"true\"}")]
    fn malformed_blocks_fall_back_to_whole_body(#[case] body: &str) {
        let decoded = decode_body(body, "/home");

        assert_eq!(
            decoded,
            CommentBody {
                comment: body.trim().to_owned(),
                page: "/home".to_owned(),
                ..CommentBody::default()
            }
        );
    }

    #[rstest]
    fn invalid_json_keeps_defaults_but_strips_block() {
        let decoded = decode_body("note\n\n```json\n{not json}\n```", "/home");

        assert_eq!(decoded.comment, "note");
        assert_eq!(decoded.page, "/home");
        assert!(!decoded.resolved);
        assert!(decoded.text.is_empty());
    }

    #[rstest]
    fn metadata_page_wins_over_requested_page() {
        let decoded = decode_body("note\n```json\n{\"page\": \"/stored\"}\n```", "/requested");

        assert_eq!(decoded.page, "/stored");
    }

    #[rstest]
    fn comment_key_in_metadata_is_ignored() {
        let decoded = decode_body(
            "real message\n```json\n{\"comment\": \"forged\", \"text\": \"anchor\"}\n```",
            "/home",
        );

        assert_eq!(decoded.comment, "real message");
        assert_eq!(decoded.text, "anchor");
    }

    #[rstest]
    fn only_first_block_is_read() {
        let body = "msg\n```json\n{\"text\": \"first\"}\n```\n```json\n{\"text\": \"second\"}\n```";

        assert_eq!(decode_body(body, "/home").text, "first");
    }

    #[rstest]
    fn empty_message_yields_empty_comment() {
        let decoded = decode_body("```json\n{\"text\": \"anchor\"}\n```", "/home");

        assert_eq!(decoded.comment, "");
        assert_eq!(decoded.text, "anchor");
    }

    #[rstest]
    fn repeated_keys_keep_the_last_value() {
        let decoded = decode_body(
            "msg\n```json\n{\"text\": \"a\", \"text\": \"b\", \"resolved\": \"true\"}\n```",
            "/home",
        );

        assert_eq!(decoded.text, "b");
        assert!(decoded.resolved, "resolved flag should survive a repeated key");
    }

    #[rstest]
    fn non_string_values_are_skipped_individually() {
        let decoded = decode_body(
            "msg\n```json\n{\"resolved\": true, \"text\": \"anchor\", \"page\": 7}\n```",
            "/home",
        );

        assert!(!decoded.resolved);
        assert_eq!(decoded.text, "anchor");
        assert_eq!(decoded.page, "/home");
    }

    #[rstest]
    fn unparseable_resolved_reads_as_false() {
        let decoded = decode_body("msg\n```json\n{\"resolved\": \"yes\"}\n```", "/home");

        assert!(!decoded.resolved);
    }

    #[rstest]
    #[case("1", true)]
    #[case("t", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case("0", false)]
    #[case("F", false)]
    #[case("false", false)]
    #[case("", false)]
    #[case("yes", false)]
    fn flags_follow_conventional_spellings(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_flag(raw), expected);
    }
}
