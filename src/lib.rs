//! Scan web pages for manipulative ("dark pattern") phrasing.
//!
//! A scan runs fetch → extract → segment → dedup → classify → report. The
//! classifier artifacts are loaded once per process and shared read-only by
//! every scan.

pub mod api;
pub mod app_state;
pub mod classifier;
pub mod config;
pub mod dedup;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod reporter;
pub mod scan;
pub mod segmenter;

pub use classifier::{Classifier, ConfigurationError, Label};
pub use reporter::{ScanOutcome, ScanReport};
pub use scan::Scanner;
