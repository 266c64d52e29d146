//! Random placement of new tiles.
//!
//! ## Position
//!
//! Positions are picked by rejection sampling: draw a uniform cell, retry
//! until it is empty. Callers only spawn onto boards known to have room,
//! and boards are rarely close to full when they do.
//!
//! ## Value
//!
//! Values come from a weighted table (`SpawnWeights`), 90% twos and 10%
//! fours unless configured otherwise.

use crate::core::{GameRng, GridError, Position, SpawnWeights, Tile, TileId, TileValue};
use crate::grid::Grid;

/// A tile placed by `SpawnPolicy::spawn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawned {
    pub position: Position,
    pub id: TileId,
    pub value: TileValue,
}

/// Chooses where new tiles appear and what they are worth.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnPolicy {
    weights: SpawnWeights,
}

impl SpawnPolicy {
    /// Create a policy over the given value table.
    #[must_use]
    pub fn new(weights: SpawnWeights) -> Self {
        Self { weights }
    }

    /// The value table.
    #[must_use]
    pub fn weights(&self) -> &SpawnWeights {
        &self.weights
    }

    /// Place one new tile on a random empty cell.
    ///
    /// Fails with `GridFull` when there is no empty cell; that means the
    /// caller spawned at the wrong time.
    pub fn spawn(&self, grid: &mut Grid, rng: &mut GameRng) -> Result<Spawned, GridError> {
        let position = self.choose_position(grid, rng)?;
        let value = self.choose_value(rng);
        let id = grid.place(Tile::new(value), position)?;

        log::trace!("spawned {value} at {position}");
        Ok(Spawned { position, id, value })
    }

    /// Uniformly random empty cell.
    pub fn choose_position(&self, grid: &Grid, rng: &mut GameRng) -> Result<Position, GridError> {
        if grid.is_full() {
            return Err(GridError::GridFull);
        }

        let size = grid.size();
        loop {
            let candidate = Position::new(rng.gen_range_usize(0..size), rng.gen_range_usize(0..size));
            if grid.is_empty_at(candidate) {
                return Ok(candidate);
            }
        }
    }

    /// Weighted random value from the table.
    pub fn choose_value(&self, rng: &mut GameRng) -> TileValue {
        rng.choose_weighted(&self.weights.weights())
            .and_then(|i| self.weights.0.get(i))
            .map_or(TileValue::TWO, |w| w.value)
    }
}
