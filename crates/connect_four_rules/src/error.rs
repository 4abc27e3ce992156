//! Errors raised by the rules.

/// Error returned when a rule of the game is broken by the caller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RulesError {
    /// Malformed input to a pure query (column out of range, bad notation).
    #[display("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument.
        message: String,
    },

    /// Operation invoked in a phase that does not allow it.
    #[display("Precondition failed: {message}")]
    Precondition {
        /// Which precondition failed.
        message: String,
    },

    /// Attempt to apply an illegal move.
    #[display("Invalid operation: {message}")]
    InvalidOperation {
        /// Why the move is illegal.
        message: String,
    },

    /// Replaying a move sequence stopped at an illegal move.
    #[display("Replay failed at move {index} (column {column}): {reason}")]
    Replay {
        /// 1-based index of the failing move.
        index: usize,
        /// Column the failing move tried to play.
        column: usize,
        /// The underlying rejection.
        reason: Box<RulesError>,
    },
}

impl RulesError {
    /// Creates an [`RulesError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a [`RulesError::Precondition`].
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Creates a [`RulesError::InvalidOperation`].
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}

impl std::error::Error for RulesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RulesError::Replay { reason, .. } => Some(reason.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = RulesError::invalid_argument("column 9 is outside 1..=7");
        assert_eq!(err.to_string(), "Invalid argument: column 9 is outside 1..=7");
    }

    #[test]
    fn test_replay_reports_index_and_source() {
        let err = RulesError::Replay {
            index: 3,
            column: 5,
            reason: Box::new(RulesError::invalid_operation("column 5 is full")),
        };
        assert_eq!(
            err.to_string(),
            "Replay failed at move 3 (column 5): Invalid operation: column 5 is full"
        );
        assert!(err.source().is_some());
    }
}
