use std::path::PathBuf;

use thiserror::Error;

/// The classifier artifacts cannot be used.
///
/// Fatal for the process: no scan may start until training has produced a
/// valid vectorizer/model pair.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("{kind} artifact not found at {}", path.display())]
    MissingArtifact { kind: &'static str, path: PathBuf },

    #[error("failed to read {kind} artifact at {}: {source}", path.display())]
    Io {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} artifact at {} is corrupt: {source}", path.display())]
    Corrupt {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {kind}: {reason}")]
    InvalidArtifact { kind: &'static str, reason: String },

    #[error("model expects {model_features} features but the vectorizer produces {vocabulary_size}")]
    Incompatible {
        model_features: usize,
        vocabulary_size: usize,
    },
}

impl ConfigurationError {
    pub(crate) fn invalid(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            kind,
            reason: reason.into(),
        }
    }
}
