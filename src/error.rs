//! Error types for the puzzle solver.

use thiserror::Error;

use crate::puzzle::Move;

/// Why a search stopped before reaching a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The caller cancelled the search through its token.
    Cancelled,
    /// The configured expansion cap was reached.
    ExpansionLimit(usize),
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::Cancelled => write!(f, "cancelled"),
            AbortReason::ExpansionLimit(limit) => write!(f, "expansion limit of {limit} reached"),
        }
    }
}

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action: ({row}, {col}) is not adjacent to the blank")]
    InvalidAction { row: usize, col: usize },

    #[error("no tile can slide {movement} into the blank")]
    IllegalMove { movement: Move },

    #[error("frontier is empty")]
    EmptyFrontier,

    #[error("no solution found after exploring {explored} states")]
    NoSolution { explored: usize },

    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    #[error("search aborted after exploring {explored} states: {reason}")]
    SearchAborted { explored: usize, reason: AbortReason },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_board(reason: impl Into<String>) -> Self {
        Error::InvalidBoard {
            reason: reason.into(),
        }
    }
}
