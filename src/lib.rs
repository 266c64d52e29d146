//! # tile-merge
//!
//! A rule engine for the sliding-tile merge game (2048 and variants).
//!
//! ## Design Principles
//!
//! 1. **Rendering-Agnostic**: The engine never draws or animates. Front ends
//!    pull snapshots after each command and replay moves from
//!    `MoveOutcome::playback` at their own pace.
//!
//! 2. **Deterministic When Asked**: All randomness flows through one seeded
//!    `GameRng`. A fixed seed replays a game exactly; sessions can be
//!    checkpointed and resumed mid-game.
//!
//! 3. **Configuration Over Convention**: Grid size, win value, spawn table and
//!    unlock credits come from `SessionConfig`.
//!
//! ## Architecture
//!
//! - **Tile arena**: `Grid` stores tiles by `TileId` and keeps a
//!   position index both ways, so a tile keeps its identity while it slides.
//!
//! - **Pure engine**: `MoveEngine` only touches a `Grid`. Spawning, the
//!   unlock swap, terminal detection and records live in `GameSession`.
//!
//! ## Modules
//!
//! - `core`: Positions, directions, tiles, RNG, configuration, errors
//! - `grid`: The board and its snapshots
//! - `engine`: Shift/merge rules and move playback
//! - `spawn`: Random tile placement after a move
//! - `score`: Best-score / best-time persistence
//! - `session`: The game session state machine
//! - `input`: Pointer-to-cell mapping for front ends

pub mod core;
pub mod grid;
pub mod engine;
pub mod spawn;
pub mod score;
pub mod session;
pub mod input;

// Re-export commonly used types
pub use crate::core::{
    Direction, Position,
    Cell, Tile, TileId, TileValue,
    GameRng, GameRngState,
    SessionConfig, SpawnWeight, SpawnWeights,
    ConfigError, GameError, GridError,
};

pub use crate::grid::{Grid, GridSnapshot};

pub use crate::engine::{MergeEvent, MoveEngine, MoveOutcome, MovePlayback, ShiftStep};

pub use crate::spawn::{SpawnPolicy, Spawned};

pub use crate::score::{BestRecord, FileScoreStore, MemoryScoreStore, ScoreError, ScoreStore};

pub use crate::session::{
    Checkpoint, GameSession, GameSessionBuilder,
    MoveReport, SessionError, SessionSnapshot, SessionState, SwapReport,
};

pub use crate::input::PointerMapping;
