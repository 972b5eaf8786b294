use std::time::Duration;

use thiserror::Error;

/// Why a page could not be fetched.
///
/// Every variant is recoverable at the pipeline level: the scan carries on
/// with no text blocks and reports the page as unreadable.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("failed reading body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl FetchError {
    pub fn from_reqwest_error(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = FetchError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "request timed out after 5s");
        assert!(err.is_timeout());

        let err = FetchError::Http {
            status: reqwest::StatusCode::FORBIDDEN,
        };
        assert_eq!(err.to_string(), "http error 403 Forbidden");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_parse_error_converts() {
        let err: FetchError = url::Url::parse("https://").unwrap_err().into();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
