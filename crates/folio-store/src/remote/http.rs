//! Response checks shared by the REST remote.
//!
//! Every non-success response and transport error is mapped onto a
//! [`RemoteFailure`] here, so `rest.rs` only builds requests and decodes
//! bodies.

use serde::Deserialize;

use super::{RemoteError, RemoteFailure};

/// PostgREST error body.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Codes meaning the target relation is not there.
const MISSING_SCHEMA_CODES: &[&str] = &["PGRST205", "PGRST116", "42P01"];
/// Codes meaning the caller may not touch the relation.
const PERMISSION_CODES: &[&str] = &["42501"];

/// Return the response unchanged on success, otherwise classify it.
pub(super) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, RemoteError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(classify_status(status, &body))
}

/// Build a [`RemoteError`] from a failed status and its body.
pub(super) fn classify_status(status: u16, body: &str) -> RemoteError {
    let api: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = api
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        });
    let cause = classify(Some(status), api.code.as_deref(), &message);
    RemoteError::new(cause, message)
}

/// Map a transport or decoding error.
pub(super) fn transport_error(error: &reqwest::Error) -> RemoteError {
    if let Some(status) = error.status() {
        return RemoteError::new(classify(Some(status.as_u16()), None, ""), error.to_string());
    }
    let cause = if error.is_decode() || error.is_body() {
        RemoteFailure::Unknown
    } else {
        RemoteFailure::Connectivity
    };
    RemoteError::new(cause, error.to_string())
}

/// Classify by server error code first, then message text, then status.
pub(super) fn classify(status: Option<u16>, code: Option<&str>, message: &str) -> RemoteFailure {
    if let Some(code) = code {
        if MISSING_SCHEMA_CODES.contains(&code) {
            return RemoteFailure::MissingSchema;
        }
        if PERMISSION_CODES.contains(&code) {
            return RemoteFailure::PermissionDenied;
        }
    }
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("does not exist") || lowered.contains("could not find the table") {
        return RemoteFailure::MissingSchema;
    }
    if lowered.contains("row-level security") || lowered.contains("permission denied") {
        return RemoteFailure::PermissionDenied;
    }
    match status {
        Some(404) => RemoteFailure::MissingSchema,
        Some(401 | 403) => RemoteFailure::PermissionDenied,
        _ => RemoteFailure::Unknown,
    }
}

/// Total row count from a `Content-Range` header such as `0-0/42` or `*/0`.
pub(super) fn parse_content_range_total(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit_once('/'))
        .and_then(|(_, total)| total.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_response_with_range(value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(206)
                .header("Content-Range", value)
                .body(String::new())
                .unwrap(),
        )
    }

    #[rstest]
    #[case(404, "", RemoteFailure::MissingSchema)]
    #[case(
        404,
        r#"{"code":"PGRST205","message":"Could not find the table 'public.projects' in the schema cache"}"#,
        RemoteFailure::MissingSchema
    )]
    #[case(
        400,
        r#"{"code":"42P01","message":"relation \"public.projects\" does not exist"}"#,
        RemoteFailure::MissingSchema
    )]
    #[case(406, r#"{"code":"PGRST116","message":"no rows"}"#, RemoteFailure::MissingSchema)]
    #[case(
        401,
        r#"{"code":"42501","message":"new row violates row-level security policy"}"#,
        RemoteFailure::PermissionDenied
    )]
    #[case(403, "", RemoteFailure::PermissionDenied)]
    #[case(401, r#"{"message":"Invalid API key"}"#, RemoteFailure::PermissionDenied)]
    #[case(500, "boom", RemoteFailure::Unknown)]
    #[case(409, r#"{"code":"23505","message":"duplicate key"}"#, RemoteFailure::Unknown)]
    fn classifies_failed_responses(
        #[case] status: u16,
        #[case] body: &str,
        #[case] expected: RemoteFailure,
    ) {
        assert_eq!(classify_status(status, body).cause, expected);
    }

    #[test]
    fn message_prefers_api_body() {
        let err = classify_status(400, r#"{"code":"22P02","message":"invalid input syntax"}"#);
        assert_eq!(err.message, "invalid input syntax");
    }

    #[test]
    fn empty_body_names_the_status() {
        assert_eq!(classify_status(502, "").message, "HTTP 502");
    }

    #[tokio::test]
    async fn check_response_passes_success_through() {
        assert!(check_response(mock_response(200, "[]")).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_classifies_failure() {
        let err = check_response(mock_response(403, "")).await.unwrap_err();
        assert_eq!(err.cause, RemoteFailure::PermissionDenied);
    }

    #[rstest]
    #[case("0-0/42", Some(42))]
    #[case("*/0", Some(0))]
    #[case("*/*", None)]
    fn content_range_total(#[case] header: &str, #[case] expected: Option<u64>) {
        assert_eq!(
            parse_content_range_total(&mock_response_with_range(header)),
            expected
        );
    }
}
