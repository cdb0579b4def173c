//! Error taxonomy for the puzzle core.
//!
//! Only configuration misuse and corrupted persisted state are errors. Expected
//! gameplay conditions (a drop without a held piece, an exhausted preview budget,
//! an out-of-range target) are no-ops reported through `bool`/`Option` returns.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// Bad grid size or time budget. Fatal to the operation that received it.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Persisted pieces do not form a valid board.
    #[error("state corruption: {0}")]
    StateCorruption(String),
}

impl PuzzleError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Self::StateCorruption(msg.into())
    }
}
