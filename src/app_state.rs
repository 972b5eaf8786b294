use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::classifier::ConfigurationError;
use crate::config::Config;
use crate::scan::Scanner;

/// Shared state for the HTTP shell.
///
/// The scanner is built on first use. Until the classifier artifacts exist
/// every attempt fails with a [`ConfigurationError`] and is retried on the
/// next request; once built it is reused for the life of the process.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    scanner: Arc<OnceCell<Scanner>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            scanner: Arc::new(OnceCell::new()),
        }
    }

    /// State with a scanner that is already built.
    pub fn with_scanner(config: Config, scanner: Scanner) -> Self {
        Self {
            config: Arc::new(config),
            scanner: Arc::new(OnceCell::with_value(scanner)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scanner(&self) -> Result<Scanner, ConfigurationError> {
        self.scanner
            .get_or_try_init(|| Scanner::from_config(&self.config))
            .cloned()
    }
}
