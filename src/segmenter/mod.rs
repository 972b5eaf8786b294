//! Sentence candidates from text blocks.
//!
//! Boundary detection is a heuristic: any run of `.`, `!` or `?` ends a
//! candidate. It does not try to recognise abbreviations, decimals or
//! clause structure. Other strategies can be added behind [`Segmenter`]
//! without touching the rest of the pipeline.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::extractor::TextBlock;

/// Fragments shorter than this (in characters, after trimming) are noise.
pub const MIN_SENTENCE_CHARS: usize = 10;

static BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid boundary regex"));

/// A trimmed candidate of at least [`MIN_SENTENCE_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Sentence(String);

impl Sentence {
    /// Trim `fragment`; `None` when what is left is too short.
    pub fn parse(fragment: &str) -> Option<Self> {
        let trimmed = fragment.trim();
        (trimmed.chars().count() >= MIN_SENTENCE_CHARS).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Sentence {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Sentence {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait Segmenter: Send + Sync {
    /// Candidates from one block, in order of appearance.
    fn split(&self, block: &str) -> Vec<Sentence>;

    /// Candidates from every block, flattened in order. Duplicates are kept.
    fn segment(&self, blocks: &[TextBlock]) -> Vec<Sentence> {
        blocks
            .iter()
            .flat_map(|block| self.split(block.as_str()))
            .collect()
    }
}

/// Splits on runs of sentence-terminal punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl Segmenter for PunctuationSegmenter {
    fn split(&self, block: &str) -> Vec<Sentence> {
        BOUNDARY_REGEX.split(block).filter_map(Sentence::parse).collect()
    }
}
