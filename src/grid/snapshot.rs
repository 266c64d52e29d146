//! Immutable board views handed to rendering layers.

use serde::{Deserialize, Serialize};

use crate::core::{Position, Tile};

/// Per-cell copy of a grid: size, value and merge flag of every cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl GridSnapshot {
    pub(crate) fn new(size: usize, cells: Vec<Option<Tile>>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    /// Tile at a position, if any.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<Tile> {
        if !position.in_bounds(self.size) {
            return None;
        }
        self.cells[position.index(self.size)]
    }

    /// Value at a position, if any.
    #[must_use]
    pub fn value_at(&self, position: Position) -> Option<u32> {
        self.tile_at(position).map(|t| t.value.get())
    }

    /// Merge flag at a position (false for empty cells).
    #[must_use]
    pub fn merged_at(&self, position: Position) -> bool {
        self.tile_at(position).is_some_and(|t| t.merged)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Values as nested rows, 0 for empty cells (the `Grid::from_rows` format).
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.map_or(0, |t| t.value.get())).collect())
            .collect()
    }

    pub(crate) fn set(&mut self, position: Position, cell: Option<Tile>) {
        let index = position.index(self.size);
        self.cells[index] = cell;
    }
}

impl std::fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .cells
            .iter()
            .flatten()
            .map(|t| t.value.get().to_string().len() + 1)
            .max()
            .unwrap_or(1)
            .max(5);
        let border = format!("+{}+", "-".repeat((width + 1) * self.size + 1));

        writeln!(f, "{border}")?;
        for row in self.cells.chunks(self.size) {
            write!(f, "|")?;
            for cell in row {
                match cell {
                    Some(tile) if tile.merged => write!(f, " {:>w$}", format!("{}*", tile.value), w = width)?,
                    Some(tile) => write!(f, " {:>w$}", tile.value.get(), w = width)?,
                    None => write!(f, " {:>w$}", ".", w = width)?,
                }
            }
            writeln!(f, " |")?;
        }
        write!(f, "{border}")
    }
}
