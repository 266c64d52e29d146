//! Grid coordinates and move directions.
//!
//! `Position` uses `(row, col)` with row 0 at the top and col 0 at the left.
//! `Direction` is the only input a move needs; it also knows how to walk a
//! position one step toward its edge.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A cell coordinate on an N×N board.
///
/// Positions are plain coordinates; bounds are checked by the `Grid`
/// that receives them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if this position lies on a board of the given size.
    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Row-major index into a flat slot array.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of `index`.
    #[must_use]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Step one cell in `direction`.
    ///
    /// Returns `None` when the step would leave the board.
    #[must_use]
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let next = match direction {
            Direction::Up => Self::new(self.row.checked_sub(1)?, self.col),
            Direction::Down => Self::new(self.row + 1, self.col),
            Direction::Left => Self::new(self.row, self.col.checked_sub(1)?),
            Direction::Right => Self::new(self.row, self.col + 1),
        };
        next.in_bounds(size).then_some(next)
    }

    /// Iterate over every position of a board in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Position> {
        (0..size * size).map(move |i| Position::from_index(i, size))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four move directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for left/right, where lines are rows.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Cells of line `line` ordered from the target edge to the far edge.
    ///
    /// Lines are rows for horizontal moves and columns for vertical moves.
    /// Processing cells in this order guarantees a tile never overtakes a
    /// tile already finalized for the move.
    pub fn line_from_edge(self, line: usize, size: usize) -> impl Iterator<Item = Position> {
        (0..size).map(move |k| match self {
            Direction::Left => Position::new(line, k),
            Direction::Right => Position::new(line, size - 1 - k),
            Direction::Up => Position::new(k, line),
            Direction::Down => Position::new(size - 1 - k, line),
        })
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Error returned when a string names no direction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts direction names, arrow-key names and `w/a/s/d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" | "w" | "k" => Ok(Direction::Up),
            "down" | "arrowdown" | "s" | "j" => Ok(Direction::Down),
            "left" | "arrowleft" | "a" | "h" => Ok(Direction::Left),
            "right" | "arrowright" | "d" | "l" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}
