//! Session states, command reports and observation snapshots.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ConfigError, GameError, GameRngState, GridError, Position, TileValue};
use crate::engine::MoveOutcome;
use crate::grid::GridSnapshot;
use crate::score::BestRecord;
use crate::spawn::Spawned;

/// Where the session is in its command cycle.
///
/// ```text
/// Active ──swap_start──▶ SwapPending ──swap_commit──▶ Active | GameOver
///   │ ▲                      ▲                              │
///   │ └────── restart ───────┼──────────────────────────────┤
///   └── play_move ──▶ GameOver ──swap_start─────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Accepting moves.
    Active,
    /// A swap was started at `anchor`; moves are rejected until it is
    /// committed or cancelled.
    SwapPending { anchor: Position },
    /// Board full with no merge left.
    GameOver,
}

/// Result of `GameSession::play_move`.
#[derive(Clone, Debug)]
pub struct MoveReport {
    /// What the engine did.
    pub outcome: MoveOutcome,
    /// Tile spawned after the move, if the move changed the board.
    pub spawned: Option<Spawned>,
    /// Terminal state after the move and spawn.
    pub game_over: bool,
    /// True if the best record changed.
    pub new_best: bool,
}

impl MoveReport {
    /// Whether the move changed the board.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.outcome.moved
    }
}

/// Result of `GameSession::swap_commit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapReport {
    /// Committed on the anchor cell; nothing changed and no credit was spent.
    Cancelled,
    /// The two cells were exchanged.
    Swapped {
        from: Position,
        to: Position,
        game_over: bool,
    },
}

/// Everything a renderer needs after a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub grid: GridSnapshot,
    pub state: SessionState,
    pub is_over: bool,
    pub unlock_credits: u32,
    pub best: BestRecord,
    pub elapsed: Duration,
}

/// Errors raised while building or checkpointing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("checkpoint encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

impl From<GridError> for SessionError {
    fn from(err: GridError) -> Self {
        SessionError::Game(err.into())
    }
}

/// Serializable save of a running session.
///
/// Pending swaps are not saved; a restored session starts `Active` or
/// `GameOver` depending on its board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub grid: GridSnapshot,
    pub unlock_credits: u32,
    pub elapsed: Duration,
    pub session_max: Option<TileValue>,
    pub rng: GameRngState,
}

impl Checkpoint {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SessionError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SessionError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
