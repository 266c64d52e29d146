//! Error types for grid mutation and session commands.

use thiserror::Error;

use super::position::Position;

/// Errors raised by `Grid` operations.
///
/// Every variant is returned before the grid is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {position} is outside a {size}x{size} grid")]
    OutOfBounds { position: Position, size: usize },

    #[error("no empty cell left to spawn into")]
    GridFull,

    #[error("cell {0} is already occupied")]
    CellOccupied(Position),

    #[error("grid index is inconsistent: {0}")]
    Inconsistent(String),
}

/// Errors raised by `GameSession` commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("moves are disabled while a swap is pending")]
    SwapInProgress,

    #[error("no unlock credits remaining")]
    NoUnlockCredits,

    #[error("a swap is already pending at {0}")]
    SwapAlreadyPending(Position),

    #[error("no swap pending, or swap target is off the board")]
    InvalidSwapTarget,
}
