//! The tile grid: slots, tile arena and occupancy index.
//!
//! The `Grid` tracks which tile sits in which cell and keeps three views
//! of that fact in sync:
//! - `slots`: row-major `Cell` array
//! - `tiles`: arena of tile data keyed by `TileId`
//! - `positions`: occupancy index `TileId -> Position`
//!
//! Every public mutation validates its positions before touching any of
//! them, so a failed call leaves the grid exactly as it was.

use rustc_hash::FxHashMap;

use crate::core::{Cell, Direction, GridError, Position, Tile, TileId, TileValue};

use super::snapshot::GridSnapshot;

/// The occupied cell found by `Grid::neighbor_in_direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub position: Position,
    pub id: TileId,
    pub tile: Tile,
}

/// N×N board of tiles.
///
/// ## Usage
///
/// ```
/// use tile_merge::core::{Direction, Position, Tile, TileValue};
/// use tile_merge::grid::Grid;
///
/// let mut grid = Grid::new(4);
/// let two = Tile::new(TileValue::TWO);
///
/// grid.place(two, Position::new(0, 3)).unwrap();
/// let neighbor = grid.neighbor_in_direction(Position::new(0, 0), Direction::Right);
/// assert_eq!(neighbor.map(|n| n.position), Some(Position::new(0, 3)));
///
/// assert!(grid.place(two, Position::new(4, 0)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    slots: Vec<Cell>,
    tiles: FxHashMap<TileId, Tile>,
    positions: FxHashMap<TileId, Position>,
    next_tile_id: u32,
}

impl Grid {
    /// Create an empty `size`×`size` grid.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "Grid must be at least 2x2");

        Self {
            size,
            slots: vec![Cell::Empty; size * size],
            tiles: FxHashMap::default(),
            positions: FxHashMap::default(),
            next_tile_id: 0,
        }
    }

    /// Build a grid from row literals, where 0 marks an empty cell.
    ///
    /// Intended for scenarios and tests:
    ///
    /// ```
    /// use tile_merge::grid::Grid;
    ///
    /// let grid = Grid::from_rows(&[[2, 0], [0, 4]]);
    /// assert_eq!(grid.tile_count(), 2);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the rows are not square or contain a value that is neither
    /// 0 nor a power of two ≥ 2.
    #[must_use]
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Self {
        let mut grid = Grid::new(rows.len());

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            assert_eq!(values.len(), grid.size, "row {row} has the wrong length");

            for (col, &raw) in values.iter().enumerate() {
                if raw == 0 {
                    continue;
                }
                let value = TileValue::new(raw)
                    .unwrap_or_else(|| panic!("{raw} is not a valid tile value"));
                grid.insert_unchecked(Tile::new(value), Position::new(row, col));
            }
        }

        grid
    }

    /// Rebuild a grid from a snapshot (fresh tile ids, merge flags kept).
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self, GridError> {
        let size = snapshot.size();
        if size < 2 || snapshot.cells().len() != size * size {
            return Err(GridError::Inconsistent(format!(
                "snapshot of size {} has {} cells",
                size,
                snapshot.cells().len()
            )));
        }

        let mut grid = Grid::new(size);
        for (index, cell) in snapshot.cells().iter().enumerate() {
            if let Some(tile) = cell {
                grid.insert_unchecked(*tile, Position::from_index(index, size));
            }
        }
        Ok(grid)
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Fail with `OutOfBounds` unless `position` is on the board.
    pub fn check_bounds(&self, position: Position) -> Result<(), GridError> {
        if position.in_bounds(self.size) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                position,
                size: self.size,
            })
        }
    }

    // === Queries ===

    /// Contents of a cell.
    pub fn cell(&self, position: Position) -> Result<Cell, GridError> {
        self.check_bounds(position)?;
        Ok(self.slots[position.index(self.size)])
    }

    /// Tile at a position (`None` for empty or off-board cells).
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<Tile> {
        let id = self.cell(position).ok()?.tile_id()?;
        self.tiles.get(&id).copied()
    }

    /// Numeric value at a position, if occupied.
    #[must_use]
    pub fn value_at(&self, position: Position) -> Option<u32> {
        self.tile_at(position).map(|t| t.value.get())
    }

    /// Tile data by id.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Where a tile currently sits.
    #[must_use]
    pub fn position_of(&self, id: TileId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    /// Check if a cell is on the board and empty.
    #[must_use]
    pub fn is_empty_at(&self, position: Position) -> bool {
        matches!(self.cell(position), Ok(Cell::Empty))
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.slots.len() - self.positions.len()
    }

    /// True iff every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| Position::from_index(i, self.size))
            .collect()
    }

    /// Occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TileId, &Tile)> + '_ {
        self.slots.iter().enumerate().filter_map(move |(i, cell)| {
            let id = cell.tile_id()?;
            let tile = self.tiles.get(&id)?;
            Some((Position::from_index(i, self.size), id, tile))
        })
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.tiles.values().map(|t| u64::from(t.value.get())).sum()
    }

    /// Largest tile on the board.
    #[must_use]
    pub fn max_value(&self) -> Option<TileValue> {
        self.tiles.values().map(|t| t.value).max()
    }

    /// First occupied cell strictly beyond `position` in `direction`.
    ///
    /// Scans toward the board edge, skipping empty cells. Returns `None` if
    /// the edge is reached first, or if `position` is off the board.
    #[must_use]
    pub fn neighbor_in_direction(&self, position: Position, direction: Direction) -> Option<Neighbor> {
        if !position.in_bounds(self.size) {
            return None;
        }

        let mut cursor = position;
        while let Some(next) = cursor.step(direction, self.size) {
            if let Cell::Occupied(id) = self.slots[next.index(self.size)] {
                let tile = *self.tiles.get(&id)?;
                return Some(Neighbor {
                    position: next,
                    id,
                    tile,
                });
            }
            cursor = next;
        }
        None
    }

    /// True if some tile has an equal-valued tile directly next to it that it
    /// can merge with.
    ///
    /// Only right and down neighbors are checked; that covers every
    /// orthogonal pair exactly once.
    #[must_use]
    pub fn has_legal_merge(&self) -> bool {
        self.iter().any(|(pos, _, tile)| {
            [Direction::Right, Direction::Down].into_iter().any(|dir| {
                pos.step(dir, self.size)
                    .and_then(|next| self.tile_at(next))
                    .is_some_and(|other| other.value.merges_with(tile.value))
            })
        })
    }

    // === Mutation ===

    /// Put `tile` at `position`, replacing any previous occupant.
    ///
    /// Returns the id allocated to the new tile.
    pub fn place(&mut self, tile: Tile, position: Position) -> Result<TileId, GridError> {
        self.check_bounds(position)?;
        self.evict(position);
        Ok(self.insert_unchecked(tile, position))
    }

    /// Empty a cell, returning the tile that was there.
    pub fn remove(&mut self, position: Position) -> Result<Option<Tile>, GridError> {
        self.check_bounds(position)?;
        Ok(self.evict(position))
    }

    /// Exchange the contents of two cells.
    ///
    /// Both positions are validated before either cell changes. Tiles keep
    /// their ids; empty cells may take part.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), GridError> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        if a == b {
            return Ok(());
        }

        let (ia, ib) = (a.index(self.size), b.index(self.size));
        self.slots.swap(ia, ib);

        if let Cell::Occupied(id) = self.slots[ia] {
            self.positions.insert(id, a);
        }
        if let Cell::Occupied(id) = self.slots[ib] {
            self.positions.insert(id, b);
        }
        Ok(())
    }

    /// Slide the tile at `from` into the empty cell `to`, keeping its id.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) -> Result<TileId, GridError> {
        self.check_bounds(from)?;
        self.check_bounds(to)?;

        let id = self.slots[from.index(self.size)]
            .tile_id()
            .ok_or_else(|| GridError::Inconsistent(format!("no tile to move at {from}")))?;
        if from == to {
            return Ok(id);
        }
        if !self.slots[to.index(self.size)].is_empty() {
            return Err(GridError::CellOccupied(to));
        }

        self.slots[from.index(self.size)] = Cell::Empty;
        self.slots[to.index(self.size)] = Cell::Occupied(id);
        self.positions.insert(id, to);
        Ok(id)
    }

    /// Merge the tile at `from` into the equal tile at `into`.
    ///
    /// Both sources leave the arena; a new doubled tile with `merged = true`
    /// takes `into`. Two `TileValue::MAX` tiles cannot merge.
    pub(crate) fn merge_into(&mut self, from: Position, into: Position) -> Result<(TileId, Tile), GridError> {
        let source = self
            .tile_at(from)
            .ok_or_else(|| GridError::Inconsistent(format!("no tile to merge at {from}")))?;
        let target = self
            .tile_at(into)
            .ok_or_else(|| GridError::Inconsistent(format!("no merge target at {into}")))?;
        let merged = Tile::merged_from(target.value)
            .filter(|_| source.value.merges_with(target.value) && from != into)
            .ok_or_else(|| {
                GridError::Inconsistent(format!(
                    "cannot merge {} at {from} into {} at {into}",
                    source.value, target.value
                ))
            })?;
        self.evict(from);
        self.evict(into);
        let id = self.insert_unchecked(merged, into);
        Ok((id, merged))
    }

    /// Remove every tile.
    pub fn clear(&mut self) {
        self.slots.fill(Cell::Empty);
        self.tiles.clear();
        self.positions.clear();
    }

    /// Reset the merged flag on every tile.
    pub fn clear_merge_flags(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.merged = false;
        }
    }

    // === Snapshots & Invariants ===

    /// Read-only copy of the board for observers.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        let cells = self
            .slots
            .iter()
            .map(|cell| cell.tile_id().and_then(|id| self.tiles.get(&id).copied()))
            .collect();
        GridSnapshot::new(self.size, cells)
    }

    /// Verify that slots, arena and index describe the same board.
    pub fn check_invariants(&self) -> Result<(), GridError> {
        let mut occupied = 0;

        for (index, cell) in self.slots.iter().enumerate() {
            let Cell::Occupied(id) = *cell else { continue };
            occupied += 1;

            let expected = Position::from_index(index, self.size);
            match self.positions.get(&id) {
                Some(&pos) if pos == expected => {}
                other => {
                    return Err(GridError::Inconsistent(format!(
                        "{id} sits at {expected} but is indexed at {other:?}"
                    )))
                }
            }
            if !self.tiles.contains_key(&id) {
                return Err(GridError::Inconsistent(format!("{id} has no tile data")));
            }
        }

        if occupied != self.positions.len() || occupied != self.tiles.len() {
            return Err(GridError::Inconsistent(format!(
                "{occupied} occupied slots, {} index entries, {} tiles",
                self.positions.len(),
                self.tiles.len()
            )));
        }

        if let Some((id, pos)) = self.positions.iter().find(|(_, p)| !p.in_bounds(self.size)) {
            return Err(GridError::Inconsistent(format!("{id} indexed off-board at {pos}")));
        }

        Ok(())
    }

    // === Internals ===

    fn alloc_tile_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }

    /// Insert into a cell already known to be in bounds and empty.
    fn insert_unchecked(&mut self, tile: Tile, position: Position) -> TileId {
        let id = self.alloc_tile_id();
        self.slots[position.index(self.size)] = Cell::Occupied(id);
        self.tiles.insert(id, tile);
        self.positions.insert(id, position);
        id
    }

    /// Empty an in-bounds cell, dropping its tile from arena and index.
    fn evict(&mut self, position: Position) -> Option<Tile> {
        let index = position.index(self.size);
        let id = self.slots[index].tile_id()?;
        self.slots[index] = Cell::Empty;
        self.positions.remove(&id);
        self.tiles.remove(&id)
    }
}

impl PartialEq for Grid {
    /// Grids are equal when they show the same board; tile ids are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}
