//! Directional shifting and merge resolution.

use smallvec::SmallVec;

use crate::core::{Direction, GridError, Position, TileId, TileValue};
use crate::grid::{Grid, GridSnapshot};

use super::playback::{MovePlayback, ShiftStep};

/// A merge that happened during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeEvent {
    /// Cell of the tile produced by the merge.
    pub at: Position,
    /// Id of the tile produced by the merge.
    pub id: TileId,
    /// Value of the tile produced by the merge.
    pub value: TileValue,
}

/// Everything a single move did to a grid.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// Direction that was applied.
    pub direction: Direction,
    /// True if any tile changed position or merged.
    pub moved: bool,
    /// Merges in the order they happened.
    pub merges: SmallVec<[MergeEvent; 4]>,
    steps: Vec<ShiftStep>,
    before: GridSnapshot,
}

impl MoveOutcome {
    /// Slides and merges in the order they were applied.
    #[must_use]
    pub fn steps(&self) -> &[ShiftStep] {
        &self.steps
    }

    /// Board before the move.
    #[must_use]
    pub fn before(&self) -> &GridSnapshot {
        &self.before
    }

    /// Replay the move as a sequence of intermediate boards.
    ///
    /// Each call starts a fresh replay from the pre-move board.
    #[must_use]
    pub fn playback(&self) -> MovePlayback<'_> {
        MovePlayback::new(self.before.clone(), &self.steps)
    }

    /// Sum of the values created by merges (the classic 2048 score gain).
    #[must_use]
    pub fn score_gained(&self) -> u64 {
        self.merges.iter().map(|m| u64::from(m.value.get())).sum()
    }
}

/// Applies moves to grids.
///
/// ## Ordering
///
/// Lines perpendicular to the move (rows for left/right, columns for
/// up/down) are processed independently. Within a line, cells are visited
/// from the target edge toward the far edge, so each tile slides as far as
/// it can before the next one is considered and no tile overtakes another.
///
/// ## Merging
///
/// A tile merges with the nearest tile ahead of it when both carry the
/// same value and the one ahead has not merged yet in this move. The result
/// sits in the cell of the tile ahead and is flagged `merged`, which keeps
/// it out of any further merge for the rest of the move.
///
/// ```
/// use tile_merge::core::{Direction, Position};
/// use tile_merge::engine::MoveEngine;
/// use tile_merge::grid::Grid;
///
/// let mut grid = Grid::from_rows(&[[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);
/// let outcome = MoveEngine::apply_move(&mut grid, Direction::Left).unwrap();
///
/// assert!(outcome.moved);
/// assert_eq!(grid.snapshot().to_rows()[0], vec![4, 4, 0, 0]);
/// assert!(grid.tile_at(Position::new(0, 0)).unwrap().merged);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveEngine;

impl MoveEngine {
    /// Shift and merge every tile of `grid` toward `direction`.
    ///
    /// The grid is mutated in place. Flags left by an earlier move are
    /// cleared first; flags produced by this move stay set on the returned
    /// grid until the next call.
    pub fn apply_move(grid: &mut Grid, direction: Direction) -> Result<MoveOutcome, GridError> {
        grid.clear_merge_flags();

        let size = grid.size();
        let before = grid.snapshot();
        let mut steps = Vec::new();
        let mut merges = SmallVec::new();

        for line in 0..size {
            for position in direction.line_from_edge(line, size) {
                let Some(tile) = grid.tile_at(position) else {
                    continue;
                };
                if tile.merged {
                    continue;
                }

                let target = match grid.neighbor_in_direction(position, direction) {
                    None => edge_cell(position, direction, size),
                    Some(neighbor) if neighbor.tile.value.merges_with(tile.value) && !neighbor.tile.merged => {
                        let (id, merged) = grid.merge_into(position, neighbor.position)?;
                        steps.push(ShiftStep::Merge {
                            from: position,
                            into: neighbor.position,
                            value: merged.value,
                        });
                        merges.push(MergeEvent {
                            at: neighbor.position,
                            id,
                            value: merged.value,
                        });
                        continue;
                    }
                    Some(neighbor) => neighbor
                        .position
                        .step(direction.opposite(), size)
                        .ok_or_else(|| {
                            GridError::Inconsistent(format!(
                                "neighbor {} of {position} has no cell behind it",
                                neighbor.position
                            ))
                        })?,
                };

                if target != position {
                    grid.relocate(position, target)?;
                    steps.push(ShiftStep::Slide {
                        from: position,
                        to: target,
                    });
                }
            }
        }

        debug_assert!(grid.check_invariants().is_ok());

        let moved = !steps.is_empty();
        log::trace!("{direction}: {} steps, {} merges", steps.len(), merges.len());

        Ok(MoveOutcome {
            direction,
            moved,
            merges,
            steps,
            before,
        })
    }

    /// Check whether moving in `direction` would change the grid.
    ///
    /// Merge flags are ignored, since `apply_move` clears them first.
    #[must_use]
    pub fn can_move(grid: &Grid, direction: Direction) -> bool {
        let size = grid.size();
        grid.iter().any(|(position, _, tile)| {
            position
                .step(direction, size)
                .is_some_and(|next| match grid.tile_at(next) {
                    None => true,
                    Some(other) => other.value.merges_with(tile.value),
                })
        })
    }

    /// Directions that would change the grid.
    #[must_use]
    pub fn legal_directions(grid: &Grid) -> SmallVec<[Direction; 4]> {
        Direction::ALL
            .into_iter()
            .filter(|&d| Self::can_move(grid, d))
            .collect()
    }

    /// True iff the grid is full and no two orthogonal neighbors match.
    #[must_use]
    pub fn is_terminal(grid: &Grid) -> bool {
        grid.is_full() && !grid.has_legal_merge()
    }
}

/// Cell on the target edge, in the same line as `position`.
fn edge_cell(position: Position, direction: Direction, size: usize) -> Position {
    match direction {
        Direction::Left => Position::new(position.row, 0),
        Direction::Right => Position::new(position.row, size - 1),
        Direction::Up => Position::new(0, position.col),
        Direction::Down => Position::new(size - 1, position.col),
    }
}
