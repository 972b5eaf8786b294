//! Turn classifier output into a [`ScanReport`].

use std::time::Duration;

use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::classifier::ClassifiedSentence;
use crate::segmenter::Sentence;

/// Whether the page text could be analyzed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Analyzed,
    /// The page could not be fetched or held no readable text.
    Unreadable { reason: String },
}

impl ScanOutcome {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::Unreadable {
            reason: reason.into(),
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }
}

/// Result of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScanReport {
    /// Flagged sentences, verbatim, in first-seen order.
    #[schema(value_type = Vec<String>)]
    pub flagged: Vec<Sentence>,
    /// Always `flagged.len()`.
    pub count: usize,
    /// Unique sentences that were classified.
    pub candidates: usize,
    /// Wall-clock time for the whole scan.
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    #[schema(value_type = f64)]
    pub elapsed: Duration,
    pub outcome: ScanOutcome,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.count == 0
    }

    pub fn flagged_texts(&self) -> Vec<&str> {
        self.flagged.iter().map(Sentence::as_str).collect()
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Keep label-1 sentences in classifier order.
pub fn build_report(
    classified: Vec<ClassifiedSentence>,
    elapsed: Duration,
    outcome: ScanOutcome,
) -> ScanReport {
    let candidates = classified.len();
    let flagged: Vec<Sentence> = classified
        .into_iter()
        .filter(|c| c.label.is_flagged())
        .map(|c| c.sentence)
        .collect();

    ScanReport {
        count: flagged.len(),
        flagged,
        candidates,
        elapsed,
        outcome,
    }
}
