//! Error classification.
//!
//! Turns HTTP statuses and API error payloads into an [`ApiError`]. Every
//! input, however malformed, produces an error value.
//!
//! The API reports failures in one of two shapes:
//!
//! ```json
//! {"error": {"type": "request_error", "code": "entity_not_found", "detail": "..."}}
//! {"errors": [{"field": "name", "code": "required", "detail": "Name is required"}]}
//! ```

use serde_json::{json, Map, Value};

use crate::error::{ApiError, ErrorKind};

/// API error codes with a dedicated kind. Anything else is [`ErrorKind::ApiError`].
const CODE_KINDS: &[(&str, ErrorKind)] = &[
    ("authentication_failed", ErrorKind::AuthenticationError),
    ("forbidden", ErrorKind::AuthorizationError),
    ("entity_not_found", ErrorKind::NotFoundError),
    ("rate_limit_exceeded", ErrorKind::RateLimitError),
];

/// Keys of the error object that are lifted into dedicated fields.
const RESERVED_KEYS: &[&str] = &["code", "detail", "message", "errors"];

const UNKNOWN_API_ERROR: &str = "Unknown API error";
const UNEXPECTED_FORMAT: &str = "Unexpected error response format";

/// Map an API error code to its kind.
#[must_use]
pub fn kind_for_code(code: Option<&str>) -> ErrorKind {
    code.and_then(|code| {
        CODE_KINDS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, kind)| *kind)
    })
    .unwrap_or(ErrorKind::ApiError)
}

/// Classify a decoded JSON error body.
///
/// Recognizes `{"error": {...}}` and a non-empty `{"errors": [...]}`; any
/// other shape becomes [`ErrorKind::UnknownError`] with the input kept
/// verbatim in `details`.
#[must_use]
pub fn from_response(body: &Value) -> ApiError {
    if let Some(error) = body.get("error").and_then(Value::as_object) {
        return from_error_object(error);
    }

    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            return from_validation_errors(errors);
        }
    }

    ApiError::new(ErrorKind::UnknownError)
        .with_message(UNEXPECTED_FORMAT)
        .with_details(body.clone())
}

fn from_error_object(error: &Map<String, Value>) -> ApiError {
    let code = error.get("code").and_then(Value::as_str);
    let message = error
        .get("detail")
        .and_then(Value::as_str)
        .or_else(|| error.get("message").and_then(Value::as_str))
        .unwrap_or(UNKNOWN_API_ERROR);

    let meta = error
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    ApiError {
        kind: kind_for_code(code),
        code: code.map(str::to_string),
        message: Some(message.to_string()),
        details: error.get("errors").filter(|v| v.is_array()).cloned(),
        meta,
    }
}

fn from_validation_errors(errors: &[Value]) -> ApiError {
    let code = errors
        .first()
        .and_then(|first| first.get("code"))
        .and_then(Value::as_str);

    let message = errors
        .iter()
        .map(|entry| {
            let field = entry
                .get("field")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            let detail = entry
                .get("detail")
                .and_then(Value::as_str)
                .unwrap_or("Invalid value");
            format!("{field}: {detail}")
        })
        .collect::<Vec<_>>()
        .join("; ");

    ApiError {
        kind: ErrorKind::ValidationError,
        code: code.map(str::to_string),
        message: Some(message),
        details: Some(Value::Array(errors.to_vec())),
        meta: Map::new(),
    }
}

/// Classify an HTTP status together with its raw body.
///
/// 401, 403, 429 and 5xx are decided by status alone. Other 4xx statuses
/// defer to [`from_response`] when the body is JSON.
#[must_use]
pub fn from_status(status: u16, body: Option<&str>) -> ApiError {
    let raw = body.unwrap_or("");

    match status {
        401 => ApiError::new(ErrorKind::AuthenticationError)
            .with_code("authentication_failed")
            .with_message("Authentication failed: check your API key"),
        403 => ApiError::new(ErrorKind::AuthorizationError)
            .with_code("forbidden")
            .with_message("Forbidden: the API key lacks permission for this request"),
        429 => {
            let message = rate_limit_message(raw);
            let details = body.map_or(Value::Null, |b| Value::String(b.to_string()));
            ApiError::new(ErrorKind::RateLimitError)
                .with_code("rate_limit_exceeded")
                .with_message(message)
                .with_details(json!({ "body": details }))
        }
        400..=499 => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => from_response(&parsed),
            Err(_) => ApiError::new(ErrorKind::ApiError)
                .with_code(format!("client_error_{status}"))
                .with_message(format!("Client error ({status}): {raw}"))
                .with_details(json!({ "status": status, "body": raw })),
        },
        500..=599 => ApiError::new(ErrorKind::ServerError)
            .with_code(format!("server_error_{status}"))
            .with_message(format!("Server error ({status}): {raw}"))
            .with_details(json!({ "status": status, "body": raw })),
        _ => ApiError::new(ErrorKind::UnknownError)
            .with_code(format!("http_{status}"))
            .with_message(format!("Unexpected HTTP status: {status}"))
            .with_details(json!({ "status": status })),
    }
}

fn rate_limit_message(raw: &str) -> String {
    let structured = serde_json::from_str::<Value>(raw).ok().and_then(|v| {
        let error = v.get("error")?;
        error
            .get("detail")
            .or_else(|| error.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    match structured {
        Some(message) => message,
        None if !raw.trim().is_empty() => raw.to_string(),
        None => "Rate limit exceeded".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_table_is_exhaustive() {
        assert_eq!(
            kind_for_code(Some("authentication_failed")),
            ErrorKind::AuthenticationError
        );
        assert_eq!(kind_for_code(Some("forbidden")), ErrorKind::AuthorizationError);
        assert_eq!(kind_for_code(Some("entity_not_found")), ErrorKind::NotFoundError);
        assert_eq!(
            kind_for_code(Some("rate_limit_exceeded")),
            ErrorKind::RateLimitError
        );
        assert_eq!(kind_for_code(Some("bad_request")), ErrorKind::ApiError);
        assert_eq!(kind_for_code(Some("")), ErrorKind::ApiError);
        assert_eq!(kind_for_code(None), ErrorKind::ApiError);
    }

    #[test]
    fn error_object_with_detail() {
        let body = json!({
            "error": {
                "type": "request_error",
                "code": "entity_not_found",
                "detail": "Product pro_123 not found",
                "documentation_url": "https://developer.paddle.com/errors/shared/entity_not_found"
            }
        });
        let err = from_response(&body);
        assert_eq!(err.kind, ErrorKind::NotFoundError);
        assert_eq!(err.code.as_deref(), Some("entity_not_found"));
        assert_eq!(err.message.as_deref(), Some("Product pro_123 not found"));
        assert_eq!(err.meta["type"], "request_error");
        assert!(err.meta.contains_key("documentation_url"));
        assert!(!err.meta.contains_key("code"));
        assert!(err.details.is_none());
    }

    #[test]
    fn error_object_falls_back_to_legacy_message() {
        let body = json!({ "error": { "code": "forbidden", "message": "Nope" } });
        let err = from_response(&body);
        assert_eq!(err.kind, ErrorKind::AuthorizationError);
        assert_eq!(err.message.as_deref(), Some("Nope"));
    }

    #[test]
    fn detail_wins_over_message() {
        let body = json!({ "error": { "code": "x", "detail": "d", "message": "m" } });
        assert_eq!(from_response(&body).message.as_deref(), Some("d"));
    }

    #[test]
    fn error_object_keeps_nested_errors_as_details() {
        let body = json!({
            "error": {
                "code": "bad_request",
                "detail": "Invalid request",
                "errors": [{ "field": "name", "message": "required" }]
            }
        });
        let err = from_response(&body);
        assert_eq!(err.kind, ErrorKind::ApiError);
        assert_eq!(
            err.details,
            Some(json!([{ "field": "name", "message": "required" }]))
        );
        assert!(!err.meta.contains_key("errors"));
    }

    #[test]
    fn empty_error_object() {
        let err = from_response(&json!({ "error": {} }));
        assert_eq!(err.kind, ErrorKind::ApiError);
        assert_eq!(err.code, None);
        assert_eq!(err.message.as_deref(), Some("Unknown API error"));
    }

    #[test]
    fn validation_errors_are_joined_in_order() {
        let body = json!({
            "errors": [
                { "field": "name", "code": "required", "detail": "Name is required" },
                { "field": "email", "code": "invalid", "detail": "Bad email" },
                { "code": "other" },
                "not an object"
            ]
        });
        let err = from_response(&body);
        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert_eq!(err.code.as_deref(), Some("required"));
        assert_eq!(
            err.message.as_deref(),
            Some(
                "name: Name is required; email: Bad email; unknown: Invalid value; \
                 unknown: Invalid value"
            )
        );
        assert_eq!(err.details, Some(body["errors"].clone()));
        assert!(err.meta.is_empty());
    }

    #[test]
    fn unrecognized_shapes_are_unknown() {
        let shapes = [
            Value::Null,
            json!("boom"),
            json!([1, 2, 3]),
            json!({}),
            json!({ "foo": "bar" }),
            json!({ "error": "string error" }),
            json!({ "error": ["a"] }),
            json!({ "error": null }),
            json!({ "errors": null }),
            json!({ "errors": "bad" }),
            json!({ "errors": {} }),
            json!({ "errors": [] }),
        ];

        for shape in shapes {
            let err = from_response(&shape);
            assert_eq!(err.kind, ErrorKind::UnknownError, "shape: {shape}");
            assert_eq!(err.code, None);
            assert_eq!(
                err.message.as_deref(),
                Some("Unexpected error response format")
            );
            assert_eq!(err.details, Some(shape));
        }
    }

    #[test]
    fn status_401() {
        let err = from_status(401, None);
        assert_eq!(err.kind, ErrorKind::AuthenticationError);
        assert_eq!(err.code.as_deref(), Some("authentication_failed"));
        assert_eq!(from_status(401, None), err);
    }

    #[test]
    fn status_403() {
        let err = from_status(403, Some("{}"));
        assert_eq!(err.kind, ErrorKind::AuthorizationError);
        assert_eq!(err.code.as_deref(), Some("forbidden"));
    }

    #[test]
    fn status_429_uses_body() {
        let err = from_status(429, Some("x"));
        assert_eq!(err.kind, ErrorKind::RateLimitError);
        assert_eq!(err.code.as_deref(), Some("rate_limit_exceeded"));
        assert_eq!(err.message.as_deref(), Some("x"));
        assert_eq!(err.details, Some(json!({ "body": "x" })));

        let structured = r#"{"error":{"code":"too_many_requests","detail":"Slow down"}}"#;
        assert_eq!(
            from_status(429, Some(structured)).message.as_deref(),
            Some("Slow down")
        );

        let empty = from_status(429, None);
        assert_eq!(empty.message.as_deref(), Some("Rate limit exceeded"));
        assert_eq!(empty.details, Some(json!({ "body": null })));
    }

    #[test]
    fn client_error_with_json_body_delegates() {
        let body = r#"{"error":{"code":"entity_not_found","detail":"missing"}}"#;
        let err = from_status(404, Some(body));
        assert_eq!(err.kind, ErrorKind::NotFoundError);
        assert_eq!(err.message.as_deref(), Some("missing"));

        let validation =
            r#"{"errors":[{"field":"name","code":"required","detail":"Name is required"}]}"#;
        assert_eq!(
            from_status(422, Some(validation)).kind,
            ErrorKind::ValidationError
        );
    }

    #[test]
    fn client_error_with_text_body() {
        let err = from_status(418, Some("I'm a teapot"));
        assert_eq!(err.kind, ErrorKind::ApiError);
        assert_eq!(err.code.as_deref(), Some("client_error_418"));
        assert_eq!(err.message.as_deref(), Some("Client error (418): I'm a teapot"));
    }

    #[test]
    fn server_error() {
        let body = r#"{"error":{"code":"internal_error","detail":"Something went wrong"}}"#;
        let err = from_status(500, Some(body));
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.code.as_deref(), Some("server_error_500"));
        assert_eq!(
            err.message,
            Some(format!("Server error (500): {body}"))
        );
        assert_eq!(err.details, Some(json!({ "status": 500, "body": body })));

        assert_eq!(from_status(503, None).code.as_deref(), Some("server_error_503"));
    }

    #[test]
    fn unexpected_status() {
        for status in [0, 100, 302, 600, 999] {
            let err = from_status(status, Some("ignored"));
            assert_eq!(err.kind, ErrorKind::UnknownError);
            assert_eq!(err.code, Some(format!("http_{status}")));
            assert_eq!(
                err.message,
                Some(format!("Unexpected HTTP status: {status}"))
            );
            assert_eq!(err.details, Some(json!({ "status": status })));
        }
    }

    #[test]
    fn adversarial_bodies_never_panic() {
        let deep = "[".repeat(10_000) + &"]".repeat(10_000);
        let long = "a".repeat(1_000_000);
        let bodies = [
            deep.as_str(),
            long.as_str(),
            "<script>alert(1)</script>",
            "\0\0\0",
            "{\"error\": {\"code\": 1, \"detail\": [\"x\"]}}",
            "{\"errors\": [null, 1, {\"field\": 2}]}",
        ];

        for status in [400, 404, 409, 422, 429, 500] {
            for body in &bodies {
                let _ = from_status(status, Some(body));
            }
        }
    }
}
