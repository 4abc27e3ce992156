//! Runtime configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings shared by the players and the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Pause the computer players take between reasoning steps (milliseconds).
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Endpoint of the remote solver; the move string is sent as `?pos=`.
    #[serde(default = "default_solver_url")]
    solver_url: String,

    /// Upper bound on one solver request (milliseconds).
    #[serde(default = "default_solver_timeout_ms")]
    solver_timeout_ms: u64,

    /// File the terminal UI writes its logs to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_think_delay_ms() -> u64 {
    500
}

fn default_solver_url() -> String {
    "https://connect4.gamesolver.org/solve".to_string()
}

fn default_solver_timeout_ms() -> u64 {
    2000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("connect_four.log")
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            think_delay_ms: default_think_delay_ms(),
            solver_url: default_solver_url(),
            solver_timeout_ms: default_solver_timeout_ms(),
            log_file: default_log_file(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            think_delay_ms = config.think_delay_ms,
            solver_url = %config.solver_url,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Same configuration with a different thinking delay.
    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay_ms = millis(delay);
        self
    }

    /// Same configuration pointing at another solver endpoint.
    pub fn with_solver_url(mut self, url: impl Into<String>) -> Self {
        self.solver_url = url.into();
        self
    }

    /// Same configuration with another solver timeout.
    pub fn with_solver_timeout(mut self, timeout: Duration) -> Self {
        self.solver_timeout_ms = millis(timeout);
        self
    }

    /// Thinking delay as a [`Duration`].
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Solver timeout as a [`Duration`].
    pub fn solver_timeout(&self) -> Duration {
        Duration::from_millis(self.solver_timeout_ms)
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
