use std::fs;

use chrono::Utc;
use reqwest::StatusCode;
use url::Url;

use crate::extractor::{ExtractOptions, extract, extract_blocks};
use crate::fetcher::types::{Charset, PageResponse};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_product_page() {
    let html = fixture("product.html");
    let response = create_test_response(html, "https://shop.example.com/trail-runner");
    let blocks = extract(&response, &ExtractOptions::default());
    let texts: Vec<&str> = blocks.iter().map(|b| b.as_str()).collect();

    assert_eq!(texts.first(), Some(&"Trail Runner 3"));
    assert!(texts.contains(&"Hurry! Only 2 items left in stock!"));
    assert!(texts.contains(&"15 people are looking at this right now"));
    assert!(texts.contains(&"No thanks, I prefer paying full price"));

    // duplicated list items survive extraction
    let shipping = texts
        .iter()
        .filter(|t| **t == "Free shipping on orders over $50")
        .count();
    assert_eq!(shipping, 2);

    // nothing from head, nav links or script bodies
    assert!(!texts.iter().any(|t| t.contains("analytics")));
    assert!(!texts.iter().any(|t| t.contains("Example Outfitters")));
}

#[test]
fn test_noscript_content_is_not_visible() {
    let blocks = extract_blocks(&fixture("product.html"), &ExtractOptions::default());
    assert!(
        !blocks
            .iter()
            .any(|b| b.as_str().contains("enable JavaScript"))
    );
}

#[test]
fn test_without_buttons() {
    let blocks = extract_blocks(
        &fixture("product.html"),
        &ExtractOptions {
            include_buttons: false,
        },
    );
    assert!(!blocks.iter().any(|b| b.as_str() == "Add to cart"));
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";
    let blocks = extract_blocks(html, &ExtractOptions::default());
    let texts: Vec<&str> = blocks.iter().map(|b| b.as_str()).collect();
    assert!(texts.contains(&"Unclosed tags"));
    assert!(texts.contains(&"More content"));
}

#[test]
fn test_non_html_input_yields_nothing() {
    assert!(extract_blocks("", &ExtractOptions::default()).is_empty());
    assert!(extract_blocks("{\"json\": true}", &ExtractOptions::default()).is_empty());
}

fn create_test_response(html: String, url: &str) -> PageResponse {
    PageResponse {
        url_final: Url::parse(url).unwrap(),
        status: StatusCode::OK,
        body_utf8: html,
        charset: Charset::Utf8,
        fetched_at: Utc::now(),
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract_blocks(&html, &ExtractOptions::default());
        }

        #[test]
        fn test_blocks_are_trimmed_and_non_empty(html in "(<p>|<div>|<span>|</p>|</div>|[a-z !.?]){0,64}") {
            for block in extract_blocks(&html, &ExtractOptions::default()) {
                prop_assert!(!block.as_str().is_empty());
                prop_assert_eq!(block.as_str(), block.as_str().trim());
            }
        }
    }
}
