//! Outbound header assembly.

use crate::config::Configuration;

/// API version sent with every request.
pub const PADDLE_VERSION: &str = "1";

/// `User-Agent` value: `<library>/<version> (rust)`.
pub const USER_AGENT: &str = concat!("paddle-rust/", env!("CARGO_PKG_VERSION"), " (rust)");

const USER_AGENT_HEADER: &str = "User-Agent";

/// Header names the caller cannot override (compared case-insensitively).
pub const PROTECTED_HEADERS: &[&str] = &[
    "authorization",
    "content-type",
    "accept",
    "host",
    "paddle-version",
];

/// Whether `name` is a protected header.
#[must_use]
pub fn is_protected(name: &str) -> bool {
    PROTECTED_HEADERS
        .iter()
        .any(|protected| protected.eq_ignore_ascii_case(name.trim()))
}

/// Build the header list for a request.
///
/// The fixed headers come first. Caller headers follow in their original
/// order, minus any whose name matches a protected header. A caller
/// `User-Agent` replaces the default one instead of being sent alongside it.
#[must_use]
pub fn build_headers(config: &Configuration, extra: &[(String, String)]) -> Vec<(String, String)> {
    let mut headers = vec![
        (
            "Authorization".to_string(),
            format!("Bearer {}", config.api_key().expose()),
        ),
        ("Paddle-Version".to_string(), PADDLE_VERSION.to_string()),
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
        (USER_AGENT_HEADER.to_string(), USER_AGENT.to_string()),
    ];

    for (name, value) in extra {
        if is_protected(name) {
            tracing::warn!(header = %name, "Dropping caller header that overrides a protected header");
            continue;
        }
        if name.trim().eq_ignore_ascii_case(USER_AGENT_HEADER) {
            if let Some(slot) = headers
                .iter_mut()
                .find(|(n, _)| n.eq_ignore_ascii_case(USER_AGENT_HEADER))
            {
                slot.1.clone_from(value);
                continue;
            }
        }
        headers.push((name.clone(), value.clone()));
    }

    headers
}
