use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::classifier::errors::ConfigurationError;

/// Where the training step wrote its two artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub vectorizer: PathBuf,
}

impl ArtifactPaths {
    pub fn new(model: impl Into<PathBuf>, vectorizer: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            vectorizer: vectorizer.into(),
        }
    }

    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join("dark_pattern_model.json"),
            dir.join("vectorizer.json"),
        )
    }
}

pub(crate) fn read_artifact<T: DeserializeOwned>(
    kind: &'static str,
    path: &Path,
) -> Result<T, ConfigurationError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigurationError::MissingArtifact {
                kind,
                path: path.to_path_buf(),
            }
        } else {
            ConfigurationError::Io {
                kind,
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    debug!(kind, path = %path.display(), "reading artifact");
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigurationError::Corrupt {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_artifact<T: Serialize>(value: &T, path: &Path) -> io::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value).map_err(io::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_uses_default_names() {
        let paths = ArtifactPaths::in_dir("/srv/models");
        assert_eq!(paths.model, PathBuf::from("/srv/models/dark_pattern_model.json"));
        assert_eq!(paths.vectorizer, PathBuf::from("/srv/models/vectorizer.json"));
    }

    #[test]
    fn test_missing_file_is_distinct_from_corrupt() {
        let err = read_artifact::<serde_json::Value>("model", Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingArtifact { kind: "model", .. }));
    }
}
