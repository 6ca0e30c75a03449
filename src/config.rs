//! Trainer configuration loaded from TOML.

use crate::games::digit_span::{DigitCount, DEFAULT_TICK};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a training session.
///
/// ```toml
/// starting_digits = 3
/// tick_ms = 100
/// log_file = "strictly_digits.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Digit count of the first round (clamped to at least 2).
    #[serde(default = "default_starting_digits")]
    starting_digits: u32,

    /// Clock cadence in milliseconds (at least 1).
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,

    /// File the terminal UI writes its logs to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_starting_digits() -> u32 {
    DigitCount::DEFAULT_START
}

#[instrument]
fn default_tick_ms() -> u64 {
    DEFAULT_TICK.as_millis() as u64
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_digits.log")
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            starting_digits: default_starting_digits(),
            tick_ms: default_tick_ms(),
            log_file: default_log_file(),
        }
    }
}

impl TrainerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            starting_digits = config.starting_digits,
            tick_ms = config.tick_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the starting digit count.
    pub fn with_starting_digits(mut self, digits: u32) -> Self {
        self.starting_digits = digits;
        self
    }

    /// Overrides the clock cadence.
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Overrides the log file.
    pub fn with_log_file(mut self, log_file: PathBuf) -> Self {
        self.log_file = log_file;
        self
    }

    /// Starting difficulty with the floor applied.
    pub fn starting(&self) -> DigitCount {
        DigitCount::new(self.starting_digits)
    }

    /// Clock cadence, never zero.
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
