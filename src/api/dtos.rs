use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MAX_URL_LEN: usize = 2048;
const MAX_TEXT_LEN: usize = 10_000;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScanUrlRequest {
    /// Page to scan; `https://` is assumed when no scheme is given.
    pub url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScanTextRequest {
    /// One sentence or short passage to classify directly.
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ScanUrlRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("URL cannot be empty".to_string());
        }
        if self.url.len() > MAX_URL_LEN {
            return Err("URL too long".to_string());
        }
        Ok(())
    }
}

impl ScanTextRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("Text cannot be empty".to_string());
        }
        if self.text.len() > MAX_TEXT_LEN {
            return Err("Text too long".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_url_request_valid() {
        let request = ScanUrlRequest {
            url: "shop.example.com".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_scan_url_request_blank() {
        let request = ScanUrlRequest {
            url: "   ".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_scan_url_request_too_long() {
        let request = ScanUrlRequest {
            url: "a".repeat(2049),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_scan_text_request_limits() {
        assert!(ScanTextRequest { text: "".into() }.validate().is_err());
        assert!(ScanTextRequest { text: "x".repeat(10_001) }.validate().is_err());
        assert!(
            ScanTextRequest {
                text: "Only 2 left".into()
            }
            .validate()
            .is_ok()
        );
    }
}
