//! HTTP client for the remote Connect Four solver.
//!
//! The solver answers `GET {url}?pos={moves}` with one score per column:
//!
//! ```json
//! {"pos": "4", "score": [-2, -1, 0, 1, 0, -1, -2]}
//! ```
//!
//! Higher is better for the side to move. Full columns carry a large
//! sentinel that callers must ignore by filtering on valid plays.

use connect_four_rules::WIDTH;
use derive_more::{Display, Error};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Body returned by the solver.
#[derive(Debug, Clone, Deserialize)]
struct SolverResponse {
    #[serde(default)]
    pos: String,
    score: Vec<i32>,
}

/// Thin wrapper over a [`reqwest::Client`] with a bounded request time.
#[derive(Debug, Clone)]
pub struct SolverClient {
    base_url: String,
    client: reqwest::Client,
}

impl SolverClient {
    /// Creates a client for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SolverError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SolverError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the per-column scores for the position reached by `moves`.
    ///
    /// Index `i` of the result scores column `i + 1`.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn solve(&self, moves: &str) -> Result<Vec<i32>, SolverError> {
        let url = format!("{}?pos={}", self.base_url, moves);
        debug!(url = %url, "Requesting solver scores");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::REFERER, url.as_str())
            .send()
            .await
            .map_err(|e| SolverError::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolverError::new(format!("Solver returned status {}", status)));
        }

        let body: SolverResponse = response
            .json()
            .await
            .map_err(|e| SolverError::new(format!("Failed to parse response: {}", e)))?;

        if body.score.len() != WIDTH {
            return Err(SolverError::new(format!(
                "Expected {} scores, got {}",
                WIDTH,
                body.score.len()
            )));
        }

        debug!(pos = %body.pos, scores = ?body.score, "Solver answered");
        Ok(body.score)
    }
}

/// Remote solver error.
#[derive(Debug, Clone, Display, Error)]
#[display("Solver error: {} at {}:{}", message, file, line)]
pub struct SolverError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SolverError {
    /// Creates a new solver error.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_pos_parses() {
        let body: SolverResponse = serde_json::from_str(r#"{"score":[1,2,3,4,5,6,7]}"#).unwrap();
        assert_eq!(body.pos, "");
        assert_eq!(body.score.len(), WIDTH);
    }

    #[test]
    fn test_error_carries_location() {
        let err = SolverError::new("boom".to_string());
        assert_eq!(err.file, file!());
        assert!(err.to_string().starts_with("Solver error: boom"));
    }
}
