//! Response decoding.
//!
//! Decoding never fails on a malformed body. Bad gzip falls back to the raw
//! bytes, bad JSON falls back to the raw text, and only the status code can
//! turn a response into an error.

use std::io::Read;

use flate2::read::GzDecoder;
use serde_json::Value;

use crate::classify;
use crate::error::ApiError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Upper bound on decompressed size.
pub const MAX_DECOMPRESSED_BYTES: u64 = 32 * 1024 * 1024;

/// Case-insensitive header lookup.
#[must_use]
pub fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Decode a response.
///
/// Statuses of 400 and above are classified with [`classify::from_status`];
/// anything else yields the decoded body.
///
/// # Errors
///
/// Returns the classified [`ApiError`] for error statuses.
pub fn decode(status: u16, headers: &[(String, String)], body: &[u8]) -> Result<Value, ApiError> {
    let bytes = decompress(header(headers, "content-encoding"), body);

    if status >= 400 {
        let text = String::from_utf8_lossy(&bytes);
        let body = (!text.trim().is_empty()).then_some(&*text);
        let error = classify::from_status(status, body);
        tracing::warn!(
            status,
            kind = %error.kind,
            code = error.code.as_deref().unwrap_or(""),
            "Paddle API returned an error"
        );
        return Err(error);
    }

    Ok(decode_body(header(headers, "content-type"), &bytes))
}

/// Turn an already decompressed body into a value.
///
/// Empty bodies become `null`. JSON-looking bodies are parsed and a
/// top-level `data` envelope is unwrapped; everything else stays a string.
#[must_use]
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> Value {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        return Value::Null;
    }

    if !looks_like_json(content_type, &text) {
        return Value::String(text.into_owned());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(mut map)) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        Ok(other) => other,
        Err(e) => {
            tracing::debug!(error = %e, "Body looked like JSON but failed to parse");
            Value::String(text.into_owned())
        }
    }
}

/// Decompress gzip bodies, announced or sniffed by magic bytes.
///
/// Returns the input unchanged when it is not gzip, when decompression fails,
/// or when the output would exceed [`MAX_DECOMPRESSED_BYTES`].
#[must_use]
pub fn decompress(content_encoding: Option<&str>, body: &[u8]) -> Vec<u8> {
    let announced = content_encoding.is_some_and(|enc| {
        enc.split(',')
            .any(|part| part.trim().eq_ignore_ascii_case("gzip"))
    });
    if !announced && !body.starts_with(&GZIP_MAGIC) {
        return body.to_vec();
    }

    let mut out = Vec::new();
    let read = GzDecoder::new(body)
        .take(MAX_DECOMPRESSED_BYTES + 1)
        .read_to_end(&mut out);

    match read {
        Ok(len) if (len as u64) <= MAX_DECOMPRESSED_BYTES => {
            tracing::debug!(compressed = body.len(), decompressed = len, "Decompressed gzip body");
            out
        }
        Ok(_) => {
            tracing::debug!("Decompressed body too large, using raw body");
            body.to_vec()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Gzip decompression failed, using raw body");
            body.to_vec()
        }
    }
}

/// Whether a body should be parsed as JSON.
///
/// A body that opens with `{` or `[` must close with the matching bracket,
/// whatever the content type says. Other bodies are JSON only when the
/// content type is `application/json`.
#[must_use]
pub fn looks_like_json(content_type: Option<&str>, body: &str) -> bool {
    let trimmed = body.trim();
    match trimmed.as_bytes().first() {
        Some(b'{') => trimmed.ends_with('}'),
        Some(b'[') => trimmed.ends_with(']'),
        Some(_) => content_type.is_some_and(is_json_content_type),
        None => false,
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn unwraps_data_envelope() {
        let body = br#"{"data":[{"id":"pro_123"}],"meta":{"request_id":"r"}}"#;
        let value = decode(200, &headers(&[("Content-Type", "application/json")]), body).unwrap();
        assert_eq!(value, json!([{ "id": "pro_123" }]));
    }

    #[test]
    fn object_without_data_is_returned_whole() {
        let value = decode(200, &[], br#"{"id":1}"#).unwrap();
        assert_eq!(value, json!({ "id": 1 }));
    }

    #[test]
    fn sniffs_json_regardless_of_content_type() {
        let value = decode(200, &headers(&[("Content-Type", "text/plain")]), br#"{"id":1}"#).unwrap();
        assert_eq!(value, json!({ "id": 1 }));

        let value = decode(200, &headers(&[("content-type", "text/html")]), b"  [1, 2]\n").unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn unbalanced_json_stays_raw() {
        let body = b"invalid json {";
        let value = decode(200, &headers(&[("Content-Type", "application/json")]), body).unwrap();
        assert_eq!(value, json!("invalid json {"));

        let value = decode(200, &headers(&[("Content-Type", "application/json")]), b"{\"a\":1").unwrap();
        assert_eq!(value, json!("{\"a\":1"));
    }

    #[test]
    fn balanced_but_invalid_json_stays_raw() {
        let value = decode(200, &[], b"{not json}").unwrap();
        assert_eq!(value, json!("{not json}"));
    }

    #[test]
    fn json_content_type_parses_scalars() {
        let ct = headers(&[("Content-Type", "Application/JSON; charset=utf-8")]);
        assert_eq!(decode(200, &ct, b"42").unwrap(), json!(42));
        assert_eq!(decode(200, &ct, b"\"hi\"").unwrap(), json!("hi"));
        assert_eq!(decode(200, &[], b"42").unwrap(), json!("42"));
    }

    #[test]
    fn plain_text_is_returned_raw() {
        let value = decode(200, &headers(&[("Content-Type", "text/plain")]), b"OK").unwrap();
        assert_eq!(value, json!("OK"));
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(decode(204, &[], b"").unwrap(), Value::Null);
        assert_eq!(decode(200, &[], b"  \n").unwrap(), Value::Null);
    }

    #[test]
    fn preserves_nested_and_large_values() {
        let body = r#"{"data":{"n":12345678901234567,"f":1.25,"s":"héllo ✓","m":{"l":[null,true,{"x":[]}]}}}"#;
        let value = decode(200, &[], body.as_bytes()).unwrap();
        assert_eq!(value["n"], json!(12_345_678_901_234_567_u64));
        assert_eq!(value["s"], "héllo ✓");
        assert_eq!(value["m"]["l"][2]["x"], json!([]));
    }

    #[test]
    fn gzip_announced() {
        let plain = br#"{"data":{"id":"pro_1"}}"#;
        let announced = decode(200, &headers(&[("Content-Encoding", "gzip")]), &gzip(plain)).unwrap();
        assert_eq!(announced, decode(200, &[], plain).unwrap());
    }

    #[test]
    fn gzip_sniffed_without_header() {
        let plain = br#"[1,2,3]"#;
        assert_eq!(decode(200, &[], &gzip(plain)).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn invalid_gzip_falls_back_to_raw() {
        let body = [0x1f, 0x8b, b'n', b'o', b'p', b'e'];
        assert_eq!(decompress(None, &body), body.to_vec());
        let value = decode(200, &headers(&[("Content-Encoding", "gzip")]), &body).unwrap();
        assert_eq!(value, Value::String(String::from_utf8_lossy(&body).into_owned()));
    }

    #[test]
    fn announced_gzip_with_plain_body_falls_back() {
        let value = decode(200, &headers(&[("Content-Encoding", "gzip")]), br#"{"id":1}"#).unwrap();
        assert_eq!(value, json!({ "id": 1 }));
    }

    #[test]
    fn error_status_is_classified() {
        let body = br#"{"error":{"code":"entity_not_found","detail":"missing"}}"#;
        let err = decode(404, &[], body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFoundError);

        let err = decode(500, &[], &gzip(b"boom")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.message.as_deref(), Some("Server error (500): boom"));

        let err = decode(401, &[], b"").unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthenticationError);
    }

    #[test]
    fn adversarial_bodies_never_panic() {
        let deep = "{\"a\":".repeat(5_000) + "1" + &"}".repeat(5_000);
        let long = format!("{{\"data\":\"{}\"}}", "x".repeat(2_000_000));
        let bodies: Vec<Vec<u8>> = vec![
            deep.into_bytes(),
            long.into_bytes(),
            b"<script>alert('x')</script>".to_vec(),
            b"{\"data\":\"\0\0\"}".to_vec(),
            vec![0xff, 0xfe, 0xfd, b'{', 0x80, b'}'],
            vec![0x1f, 0x8b, 0x08, 0x00, 0xff, 0xff],
            b"[[[[[[[[[[".to_vec(),
            b"{\"data\": {\"__proto__\": {\"admin\": true}}}".to_vec(),
        ];

        for body in &bodies {
            for status in [200, 201, 400, 404, 422, 429, 500, 503] {
                let _ = decode(status, &headers(&[("Content-Type", "application/json")]), body);
                let _ = decode(status, &[], body);
            }
        }
    }

    #[test]
    fn looks_like_json_rules() {
        assert!(looks_like_json(None, "{}"));
        assert!(looks_like_json(Some("text/plain"), " [ ] "));
        assert!(!looks_like_json(Some("application/json"), "{"));
        assert!(!looks_like_json(Some("application/json"), "[}"));
        assert!(!looks_like_json(None, "true"));
        assert!(looks_like_json(Some("application/json"), "true"));
        assert!(!looks_like_json(Some("application/jsonp"), "true"));
        assert!(!looks_like_json(Some("application/json"), ""));
    }
}
