//! Scan an inline product page with a tiny hand-built classifier.
//!
//! Run with `cargo run --example scan_demo`.

use std::sync::Arc;

use anyhow::Result;
use darkscan::{
    Classifier, Scanner,
    classifier::{BinaryModel, CountVectorizer},
};

const PAGE: &str = r#"
<html><body>
  <h1>Weekend Sale</h1>
  <h2>Hurry! Only 2 items left in stock!</h2>
  <p>15 people are looking at this right now. Free shipping on orders over $50.</p>
  <li>This product is eco-friendly</li>
  <button>No thanks, I don't like saving money</button>
</body></html>
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("darkscan=debug"))
        .init();

    let vectorizer = CountVectorizer::from_terms([
        "only", "left", "stock", "people", "looking", "thanks", "free", "eco",
    ]);
    let model = BinaryModel::Linear {
        coefficients: vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0],
        intercept: -0.5,
    };
    let scanner = Scanner::new(Arc::new(Classifier::new(vectorizer, model)?));

    let report = scanner.scan_html(PAGE);
    println!("{} of {} sentences flagged:", report.count, report.candidates);
    for sentence in &report.flagged {
        println!("  - {sentence}");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
