//! Configuration for isamlite
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for the loader and scanner programs
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path to the record data file. The ordering index sidecar lives
    /// beside it with an `.idx` extension appended.
    pub store_path: PathBuf,

    // -------------------------------------------------------------------------
    // Text Input Configuration
    // -------------------------------------------------------------------------
    /// Field separator in the text input (single character, no quoting)
    pub delimiter: char,

    // -------------------------------------------------------------------------
    // Reporting Configuration
    // -------------------------------------------------------------------------
    /// Max records rendered by a preview scan
    pub preview_limit: usize,

    /// Emit a progress log line every N loaded records
    pub progress_every: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("customers.isam"),
            delimiter: ',',
            preview_limit: 20,
            progress_every: 100,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the record data file path
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Set the input field separator
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set the preview record limit
    pub fn preview_limit(mut self, limit: usize) -> Self {
        self.config.preview_limit = limit;
        self
    }

    /// Set the progress reporting interval (in records)
    pub fn progress_every(mut self, every: u64) -> Self {
        self.config.progress_every = every;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
