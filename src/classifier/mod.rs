//! Binary text classification over unique sentences.
//!
//! The vectorizer and model are produced by an offline training step and
//! stored as JSON. They are loaded once per process (see [`shared`]) and
//! never mutated, so scans read them concurrently without locking.

pub mod artifacts;
pub mod errors;
pub mod model;
pub mod vectorizer;

use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::dedup::UniqueSentenceSet;
use crate::segmenter::Sentence;

pub use artifacts::ArtifactPaths;
pub use errors::ConfigurationError;
pub use model::{BinaryModel, DecisionTree};
pub use vectorizer::{CountVectorizer, FeatureVector};

static SHARED: OnceCell<Arc<Classifier>> = OnceCell::new();

/// Predicted class for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Label {
    Benign = 0,
    Flagged = 1,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_flagged(self) -> bool {
        self == Self::Flagged
    }
}

impl From<bool> for Label {
    fn from(flagged: bool) -> Self {
        if flagged { Self::Flagged } else { Self::Benign }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedSentence {
    pub sentence: Sentence,
    pub label: Label,
}

/// A validated vectorizer/model pair.
#[derive(Debug, Clone)]
pub struct Classifier {
    vectorizer: CountVectorizer,
    model: BinaryModel,
}

impl Classifier {
    /// Pair the artifacts, checking each and that their widths agree.
    pub fn new(vectorizer: CountVectorizer, model: BinaryModel) -> Result<Self, ConfigurationError> {
        vectorizer.validate()?;
        model.validate()?;
        if model.n_features() != vectorizer.n_features() {
            return Err(ConfigurationError::Incompatible {
                model_features: model.n_features(),
                vocabulary_size: vectorizer.n_features(),
            });
        }
        Ok(Self { vectorizer, model })
    }

    /// Read both artifacts from disk. Either one missing or unreadable is a
    /// [`ConfigurationError`].
    #[instrument(skip_all, fields(model = %paths.model.display(), vectorizer = %paths.vectorizer.display()))]
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ConfigurationError> {
        let vectorizer: CountVectorizer = artifacts::read_artifact("vectorizer", &paths.vectorizer)?;
        let model: BinaryModel = artifacts::read_artifact("model", &paths.model)?;
        let classifier = Self::new(vectorizer, model)?;
        info!(features = classifier.vectorizer.n_features(), "classifier loaded");
        Ok(classifier)
    }

    /// Write both artifacts in the format [`Classifier::load`] reads.
    pub fn save(&self, paths: &ArtifactPaths) -> std::io::Result<()> {
        artifacts::write_artifact(&self.vectorizer, &paths.vectorizer)?;
        artifacts::write_artifact(&self.model, &paths.model)
    }

    pub fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }

    pub fn model(&self) -> &BinaryModel {
        &self.model
    }

    /// Label every sentence with one vectorize call and one predict call.
    ///
    /// Output order follows `sentences`; each appears exactly once.
    pub fn classify(&self, sentences: &UniqueSentenceSet) -> Vec<ClassifiedSentence> {
        let texts: Vec<&str> = sentences.iter().map(Sentence::as_str).collect();
        let features = self.vectorizer.transform_batch(&texts);
        let labels = self.model.predict_batch(&features);
        debug!(sentences = texts.len(), "classified batch");

        sentences
            .iter()
            .cloned()
            .zip(labels)
            .map(|(sentence, label)| ClassifiedSentence { sentence, label })
            .collect()
    }

    /// One sentence at a time. Same results as [`Classifier::classify`].
    pub fn classify_sequential(&self, sentences: &UniqueSentenceSet) -> Vec<ClassifiedSentence> {
        sentences
            .iter()
            .map(|sentence| ClassifiedSentence {
                label: self.predict_one(sentence.as_str()),
                sentence: sentence.clone(),
            })
            .collect()
    }

    pub fn predict_one(&self, sentence: &str) -> Label {
        self.model.predict(&self.vectorizer.transform(sentence))
    }
}

/// The process-wide classifier, loaded on first successful call.
///
/// Concurrent first calls block until one load finishes; a failed load is
/// not cached, so a later call can succeed once the artifacts exist. After
/// the first success `paths` is ignored.
pub fn shared(paths: &ArtifactPaths) -> Result<Arc<Classifier>, ConfigurationError> {
    SHARED
        .get_or_try_init(|| Classifier::load(paths).map(Arc::new))
        .cloned()
}

/// The process-wide classifier if it has been loaded.
pub fn try_shared() -> Option<Arc<Classifier>> {
    SHARED.get().cloned()
}
