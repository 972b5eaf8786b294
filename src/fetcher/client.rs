use once_cell::sync::Lazy;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};

use crate::fetcher::{
    errors::FetchError,
    pipeline::process_response,
    types::{FetchOptions, PageResponse},
};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const MAX_REDIRECTS: usize = 10;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

// The request deadline is applied per call so scans can carry their own bound.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .expect("Failed to build HTTP client")
});

/// Prefix `https://` unless the input already names an http(s) scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Expects an already lowercased MIME type.
fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html") || content_type.contains("application/xhtml")
}

/// Fetch a page with a single GET. No retries.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str, options: &FetchOptions) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;
    let timeout = options.timeout;

    let mut response = HTTP_CLIENT
        .get(parsed_url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|err| FetchError::from_reqwest_error(err, timeout))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_ascii_lowercase();

    if !is_html(&content_type) {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    // Content-Length may be absent or wrong for chunked/compressed bodies,
    // so the limit is also enforced while reading
    let mut body_bytes = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|err| FetchError::from_reqwest_error(err, timeout))?
    {
        body_bytes.extend_from_slice(&chunk);
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
        }
    }

    debug!(status = %status, bytes = body_bytes.len(), "page fetched");
    Ok(process_response(final_url, status, &body_bytes, &content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  shop.example.com/cart "), "https://shop.example.com/cart");
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    #[test]
    fn test_normalize_host_starting_with_http() {
        assert_eq!(normalize_url("httpbin.org/get"), "https://httpbin.org/get");
    }
}
