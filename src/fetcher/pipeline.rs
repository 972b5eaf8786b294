use std::sync::LazyLock;

use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::fetcher::types::{Charset, PageResponse};

/// How much of the body is searched for a `<meta>` charset declaration.
const META_SNIFF_BYTES: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid charset regex")
});

static META_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#)
        .expect("valid meta charset regex")
});

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#)
        .expect("valid http-equiv regex")
});

/// Decode a fetched body into a [`PageResponse`].
pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: &[u8],
    content_type: &str,
) -> PageResponse {
    let charset = detect_charset(content_type, body_bytes);
    let body_utf8 = decode_to_utf8(body_bytes, charset);

    PageResponse {
        url_final,
        status,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    }
}

/// Header charset, then `<meta>` declarations, then statistical detection.
fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return Charset::from_encoding(encoding);
    }

    let head = &body_bytes[..body_bytes.len().min(META_SNIFF_BYTES)];
    let head_str = String::from_utf8_lossy(head);

    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &head_str)
        .or_else(|| label_from(&META_HTTP_EQUIV_REGEX, &head_str))
    {
        return Charset::from_encoding(encoding);
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body_bytes.len() <= META_SNIFF_BYTES);
    Charset::from_encoding(detector.guess(None, true))
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Malformed sequences become U+FFFD instead of failing the page.
fn decode_to_utf8(body_bytes: &[u8], charset: Charset) -> String {
    let (decoded, encoding, had_errors) = charset.encoding().decode(body_bytes);
    if had_errors {
        debug!(encoding = encoding.name(), "body contained malformed sequences");
    }
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_charset_from_content_type() {
        let charset = detect_charset("text/html; charset=utf-8", b"<html></html>");
        assert_eq!(charset, Charset::Utf8);
    }

    #[test]
    fn test_detect_charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Sale</title></head></html>";
        // encoding_rs maps ISO-8859-1 onto its windows-1252 superset
        assert_eq!(detect_charset("text/html", body), Charset::Windows1252);
    }

    #[test]
    fn test_detect_charset_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=shift_jis\"></head></html>";
        assert_eq!(detect_charset("text/html", body), Charset::ShiftJis);
    }

    #[test]
    fn test_decode_windows_1252() {
        // "Café" with 0xE9 for é
        let body = b"Caf\xe9 deals end tonight";
        let decoded = decode_to_utf8(body, Charset::Windows1252);
        assert_eq!(decoded, "Café deals end tonight");
    }

    #[test]
    fn test_decode_is_lossy_on_bad_utf8() {
        let body = b"Only \xff left";
        let decoded = decode_to_utf8(body, Charset::Utf8);
        assert_eq!(decoded, "Only \u{FFFD} left");
    }

    #[test]
    fn test_process_response_keeps_url_and_status() {
        let url = Url::parse("https://shop.example.com/deal").unwrap();
        let page = process_response(
            url.clone(),
            StatusCode::OK,
            "<p>Hello</p>".as_bytes(),
            "text/html; charset=utf-8",
        );
        assert_eq!(page.url_final, url);
        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.body_utf8, "<p>Hello</p>");
        assert_eq!(page.charset, Charset::Utf8);
    }
}
