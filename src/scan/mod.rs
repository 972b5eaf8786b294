//! The scan pipeline: fetch → extract → segment → dedup → classify → report.
//!
//! Stages run strictly in order. Per-page failures (unreachable host, bad
//! status, markup with no text) degrade to an empty block list and an
//! `Unreadable` outcome; they never abort the scan.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::classifier::{self, Classifier, ConfigurationError};
use crate::config::Config;
use crate::dedup::UniqueSentenceSet;
use crate::extractor::{self, ExtractOptions, TextBlock};
use crate::fetcher::{self, FetchOptions};
use crate::reporter::{self, ScanOutcome, ScanReport};
use crate::segmenter::{PunctuationSegmenter, Segmenter};

pub const NO_READABLE_TEXT: &str = "no readable text on page";

/// Runs scans against one loaded classifier.
///
/// Cheap to clone; clones share the classifier.
#[derive(Clone)]
pub struct Scanner {
    classifier: Arc<Classifier>,
    segmenter: Arc<dyn Segmenter>,
    fetch: FetchOptions,
    extract: ExtractOptions,
}

impl Scanner {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        Self {
            classifier,
            segmenter: Arc::new(PunctuationSegmenter),
            fetch: FetchOptions::default(),
            extract: ExtractOptions::default(),
        }
    }

    /// Build from configuration using the process-wide classifier.
    ///
    /// Fails before any network activity when the artifacts are unavailable.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let classifier = classifier::shared(&config.artifact_paths())?;
        Ok(Self::new(classifier).with_fetch_options(FetchOptions::from_config(config)))
    }

    pub fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Fetch `url` (scheme optional) and scan its text.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn scan_url(&self, url: &str) -> ScanReport {
        let started = Instant::now();
        let url = fetcher::normalize_url(url);

        let (blocks, outcome) = match fetcher::fetch(&url, &self.fetch).await {
            Ok(page) => {
                let blocks = extractor::extract(&page, &self.extract);
                let outcome = readable(&blocks);
                (blocks, outcome)
            }
            Err(err) => {
                warn!(error = %err, "page unreadable");
                (Vec::new(), ScanOutcome::unreadable(err.to_string()))
            }
        };

        self.finish(&blocks, started, outcome)
    }

    /// Scan markup that has already been fetched.
    pub fn scan_html(&self, html: &str) -> ScanReport {
        let started = Instant::now();
        let blocks = extractor::extract_blocks(html, &self.extract);
        let outcome = readable(&blocks);
        self.finish(&blocks, started, outcome)
    }

    /// Scan one literal sentence, treated as a single text block.
    pub fn scan_text(&self, text: &str) -> ScanReport {
        self.scan_blocks(&[TextBlock::from(text)])
    }

    /// Run segment → dedup → classify → report over ready-made blocks.
    pub fn scan_blocks(&self, blocks: &[TextBlock]) -> ScanReport {
        self.finish(blocks, Instant::now(), ScanOutcome::Analyzed)
    }

    fn finish(&self, blocks: &[TextBlock], started: Instant, outcome: ScanOutcome) -> ScanReport {
        let pool = self.segmenter.segment(blocks);
        let unique = UniqueSentenceSet::from_pool(pool);
        let classified = self.classifier.classify(&unique);
        let report = reporter::build_report(classified, started.elapsed(), outcome);

        info!(
            blocks = blocks.len(),
            candidates = report.candidates,
            flagged = report.count,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "scan complete"
        );
        report
    }
}

fn readable(blocks: &[TextBlock]) -> ScanOutcome {
    if blocks.is_empty() {
        ScanOutcome::unreadable(NO_READABLE_TEXT)
    } else {
        ScanOutcome::Analyzed
    }
}
