//! Error types for game and engine operations.

use thiserror::Error;

/// Errors surfaced by the rules adapter, session and record writers.
#[derive(Error, Debug)]
pub enum GameError {
    /// FEN string rejected by the board parser
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Move is not in the legal move list of the current position
    #[error("Illegal move: {notation}")]
    IllegalMove { notation: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for game operations
pub type Result<T> = std::result::Result<T, GameError>;
