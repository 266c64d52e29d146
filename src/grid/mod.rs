//! The tile grid and its read-only snapshots.
//!
//! `Grid` owns the board; `GridSnapshot` is the copy handed to anything
//! that only needs to look at it (renderers, move playback, checkpoints).

mod board;
mod snapshot;

pub use board::{Grid, Neighbor};
pub use snapshot::GridSnapshot;
