//! Remote JWK set retrieval.
//!
//! Fetches a key document from an HTTPS endpoint and hands the raw body
//! to the key extractor. The engine itself never performs I/O; this is
//! the host side of a discovered `jwks_uri`.

use std::io::Read;
use std::time::Duration;

use jose_probe::{JoseError, Limits};

/// HTTP request timeout for JWKS endpoints in seconds.
const JWKS_TIMEOUT_SECS: u64 = 10;

/// Fetch the raw key document at `url`.
///
/// # Security
///
/// - Only HTTPS URLs are accepted (HTTP is rejected before any network call).
/// - Redirects are disabled to prevent HTTPS → HTTP downgrade.
/// - The response body is bounded by `limits.max_key_document_len`.
/// - URLs in error messages are stripped of credentials, query and fragment.
///
/// # Errors
///
/// Returns [`JoseError::JwksFetchError`] if the URL is not HTTPS, the
/// request fails, the server answers with a non-success status, or the
/// body exceeds the size limit.
pub fn fetch_key_document(url: &str, limits: &Limits) -> Result<Vec<u8>, JoseError> {
    let display_url = validate_url_scheme(url)?;
    fetch_body(url, &display_url, limits.max_key_document_len)
}

/// Reject non-HTTPS URLs before any network call.
fn validate_url_scheme(url: &str) -> Result<String, JoseError> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "https" => Ok(sanitize_url_for_display(&parsed)),
        Ok(parsed) => Err(JoseError::JwksFetchError {
            url: sanitize_url_for_display(&parsed),
            reason: format!(
                "only HTTPS URLs are accepted for JWKS endpoints (got scheme '{}')",
                parsed.scheme()
            ),
        }),
        Err(_) => Err(JoseError::JwksFetchError {
            url: url.to_string(),
            reason: "invalid URL for JWKS endpoint".to_string(),
        }),
    }
}

fn fetch_body(url: &str, display_url: &str, max_len: usize) -> Result<Vec<u8>, JoseError> {
    let fetch_error = |reason: String| JoseError::JwksFetchError {
        url: display_url.to_string(),
        reason,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(JWKS_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| fetch_error(sanitize_reqwest_error(&e)))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| fetch_error(sanitize_reqwest_error(&e)))?;

    if !response.status().is_success() {
        return Err(fetch_error(format!(
            "server returned HTTP {}",
            response.status().as_u16()
        )));
    }

    let limit = u64::try_from(max_len).unwrap_or(u64::MAX);
    let mut bytes = Vec::new();
    response
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|_| fetch_error("failed to read response body".to_string()))?;

    if bytes.len() > max_len {
        return Err(fetch_error(format!(
            "response exceeds maximum size of {max_len} bytes"
        )));
    }

    Ok(bytes)
}

/// Map a `reqwest` error to a generic reason that leaks no internals.
fn sanitize_reqwest_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "connection timed out".to_string()
    } else if err.is_connect() {
        "failed to connect to server".to_string()
    } else {
        "request failed".to_string()
    }
}

/// Keep only scheme, host, port and path of a URL.
fn sanitize_url_for_display(url: &reqwest::Url) -> String {
    let mut sanitized = url.clone();
    let _ = sanitized.set_username("");
    let _ = sanitized.set_password(None);
    sanitized.set_query(None);
    sanitized.set_fragment(None);
    sanitized.to_string()
}
