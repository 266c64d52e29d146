//! Input adapters for front ends.
//!
//! Key handling lives in `Direction`'s `FromStr`. This module maps pointer
//! coordinates onto grid cells for front ends that draw the board at a fixed
//! cell size.

use serde::{Deserialize, Serialize};

use crate::core::Position;

/// Maps pixel coordinates to grid cells.
///
/// ```
/// use tile_merge::core::Position;
/// use tile_merge::input::PointerMapping;
///
/// let mapping = PointerMapping::new(100.0, 10.0, 10.0);
/// assert_eq!(mapping.to_position(215.0, 15.0, 4), Some(Position::new(0, 2)));
/// assert_eq!(mapping.to_position(5.0, 15.0, 4), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerMapping {
    /// Side length of one cell, in pixels.
    pub cell_size: f64,
    /// Pixel x of the grid's left edge.
    pub origin_x: f64,
    /// Pixel y of the grid's top edge.
    pub origin_y: f64,
}

impl PointerMapping {
    pub fn new(cell_size: f64, origin_x: f64, origin_y: f64) -> Self {
        Self {
            cell_size,
            origin_x,
            origin_y,
        }
    }

    /// Cell under `(x, y)`, or `None` if the point is off the grid.
    #[must_use]
    pub fn to_position(&self, x: f64, y: f64, grid_size: usize) -> Option<Position> {
        if self.cell_size.is_nan() || self.cell_size <= 0.0 {
            return None;
        }

        let col = ((x - self.origin_x) / self.cell_size).floor();
        let row = ((y - self.origin_y) / self.cell_size).floor();
        let limit = grid_size as f64;

        if !(0.0..limit).contains(&col) || !(0.0..limit).contains(&row) {
            return None;
        }

        Some(Position::new(row as usize, col as usize))
    }
}

impl Default for PointerMapping {
    fn default() -> Self {
        Self::new(100.0, 0.0, 0.0)
    }
}
