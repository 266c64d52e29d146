//! Move engine: shifting, merging and move playback.
//!
//! `MoveEngine` turns a direction into a new board. It never spawns tiles
//! and never looks at session state; it only reads and mutates a `Grid`.
//!
//! The result of a move is a `MoveOutcome`, which records whether anything
//! changed, which merges happened, and the individual steps so a renderer
//! can animate the move through `MoveOutcome::playback`.

mod playback;
mod shift;

pub use playback::{MovePlayback, ShiftStep};
pub use shift::{MergeEvent, MoveEngine, MoveOutcome};
