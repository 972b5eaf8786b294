//! Configuration handling for the scanner and its shells.
//!
//! Everything is read from environment variables with development defaults,
//! so a fresh checkout runs as soon as the training step has written its
//! artifacts next to the binary. CLI flags may override individual values
//! afterwards through the `with_*` builders.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::classifier::ArtifactPaths;

/// Environment variable names. Public so tests and shells can refer to them.
pub const ENV_MODEL_PATH: &str = "DARKSCAN_MODEL_PATH";
pub const ENV_VECTORIZER_PATH: &str = "DARKSCAN_VECTORIZER_PATH";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "DARKSCAN_FETCH_TIMEOUT_SECS";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

/// Default values used when environment variables are absent.
const DEFAULT_MODEL_PATH: &str = "dark_pattern_model.json";
const DEFAULT_VECTORIZER_PATH: &str = "vectorizer.json";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Accepted fetch timeout range, in seconds.
pub const MIN_FETCH_TIMEOUT_SECS: u64 = 5;
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 10;

/// Field name reported when the timeout is set through the builder.
const FETCH_TIMEOUT_FIELD: &str = "fetch timeout";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    model_path: PathBuf,
    vectorizer_path: PathBuf,
    fetch_timeout: Duration,
    bind_addr: SocketAddr,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let model_path = env::var(ENV_MODEL_PATH).unwrap_or_else(|_| DEFAULT_MODEL_PATH.into());
        let vectorizer_path =
            env::var(ENV_VECTORIZER_PATH).unwrap_or_else(|_| DEFAULT_VECTORIZER_PATH.into());

        let fetch_timeout_secs = match env::var(ENV_FETCH_TIMEOUT_SECS) {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_FETCH_TIMEOUT_SECS,
                reason: format!("'{raw}' is not a whole number of seconds"),
            })?,
            Err(_) => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: ENV_BIND_ADDR,
                reason: format!("'{bind_addr}' is not a socket address"),
            })?;

        Self::default()
            .with_model_path(model_path)
            .with_vectorizer_path(vectorizer_path)
            .with_bind_addr(bind_addr)
            .with_fetch_timeout_secs(fetch_timeout_secs)
            .map_err(|err| err.with_field(ENV_FETCH_TIMEOUT_SECS))
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_vectorizer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.vectorizer_path = path.into();
        self
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the fetch timeout; rejects values outside 5–10 seconds.
    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        if !(MIN_FETCH_TIMEOUT_SECS..=MAX_FETCH_TIMEOUT_SECS).contains(&secs) {
            return Err(ConfigError::InvalidValue {
                field: FETCH_TIMEOUT_FIELD,
                reason: format!(
                    "{secs}s is outside the accepted range {MIN_FETCH_TIMEOUT_SECS}-{MAX_FETCH_TIMEOUT_SECS}s"
                ),
            });
        }
        self.fetch_timeout = Duration::from_secs(secs);
        Ok(self)
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn vectorizer_path(&self) -> &Path {
        &self.vectorizer_path
    }

    /// Upper bound for a single page fetch.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// TCP bind address for the HTTP shell.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.model_path, &self.vectorizer_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.into(),
            vectorizer_path: DEFAULT_VECTORIZER_PATH.into(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    /// Attribute the error to the source the value was read from.
    fn with_field(self, field: &'static str) -> Self {
        match self {
            Self::InvalidValue { reason, .. } => Self::InvalidValue { field, reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment-manipulating tests must run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_MODEL_PATH,
            ENV_VECTORIZER_PATH,
            ENV_FETCH_TIMEOUT_SECS,
            ENV_BIND_ADDR,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.model_path(), Path::new(DEFAULT_MODEL_PATH));
        assert_eq!(cfg.vectorizer_path(), Path::new(DEFAULT_VECTORIZER_PATH));
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.bind_addr().to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_MODEL_PATH, "/models/forest.json");
            env::set_var(ENV_VECTORIZER_PATH, "/models/vocab.json");
            env::set_var(ENV_FETCH_TIMEOUT_SECS, "10");
            env::set_var(ENV_BIND_ADDR, "0.0.0.0:9000");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.model_path(), Path::new("/models/forest.json"));
        assert_eq!(cfg.vectorizer_path(), Path::new("/models/vocab.json"));
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.bind_addr().port(), 9000);
        clear_env();
    }

    #[test]
    fn rejects_timeout_outside_range() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_FETCH_TIMEOUT_SECS, "30");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: ENV_FETCH_TIMEOUT_SECS, .. }
        ));

        unsafe {
            env::set_var(ENV_FETCH_TIMEOUT_SECS, "soon");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    fn rejects_unparseable_bind_addr() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BIND_ADDR, "localhost");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_BIND_ADDR));
        clear_env();
    }

    #[test]
    fn builder_keeps_timeout_bounds() {
        assert!(Config::default().with_fetch_timeout_secs(4).is_err());
        assert!(Config::default().with_fetch_timeout_secs(11).is_err());
        let cfg = Config::default().with_fetch_timeout_secs(7).unwrap();
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn builder_error_does_not_blame_env() {
        let err = Config::default().with_fetch_timeout_secs(30).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: FETCH_TIMEOUT_FIELD, .. }
        ));
        assert!(!err.to_string().contains(ENV_FETCH_TIMEOUT_SECS));
        assert!(err.to_string().contains("30s"));
    }
}
