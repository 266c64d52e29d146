//! Step-by-step replay of a move.
//!
//! The engine computes a move eagerly, but records each slide and merge as
//! a `ShiftStep`. A `MovePlayback` turns those steps back into a sequence
//! of board snapshots that a renderer can show at its own pace:
//! - **Lazy**: each frame is built when `next` is called
//! - **Finite**: one frame per step
//! - **Restartable**: `MoveOutcome::playback` starts a fresh replay

use serde::{Deserialize, Serialize};

use crate::core::{Position, Tile, TileValue};
use crate::grid::GridSnapshot;

/// One atomic change made during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftStep {
    /// A tile slid into an empty cell.
    Slide { from: Position, to: Position },
    /// The tile at `from` merged into the equal tile at `into`, producing `value`.
    Merge {
        from: Position,
        into: Position,
        value: TileValue,
    },
}

impl ShiftStep {
    /// Apply this step to a snapshot.
    pub(crate) fn apply(&self, frame: &mut GridSnapshot) {
        match *self {
            ShiftStep::Slide { from, to } => {
                let tile = frame.tile_at(from);
                frame.set(from, None);
                frame.set(to, tile);
            }
            ShiftStep::Merge { from, into, value } => {
                frame.set(from, None);
                frame.set(
                    into,
                    Some(Tile {
                        value,
                        merged: true,
                    }),
                );
            }
        }
    }
}

/// Iterator over intermediate boards of a move.
///
/// Yields the board after each step; the last frame is the board the move
/// produced (before any spawn).
#[derive(Clone, Debug)]
pub struct MovePlayback<'a> {
    frame: GridSnapshot,
    steps: std::slice::Iter<'a, ShiftStep>,
}

impl<'a> MovePlayback<'a> {
    pub(crate) fn new(start: GridSnapshot, steps: &'a [ShiftStep]) -> Self {
        Self {
            frame: start,
            steps: steps.iter(),
        }
    }
}

impl Iterator for MovePlayback<'_> {
    type Item = GridSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.steps.next()?;
        step.apply(&mut self.frame);
        Some(self.frame.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for MovePlayback<'_> {}
