//! Tiles, tile values and grid cells.
//!
//! ## Identity
//!
//! Every tile placed on a grid gets a `TileId` from the grid's arena
//! counter. Two tiles never share an id, even when they carry the same
//! value, and ids are not reused after a tile is merged away.
//!
//! ## Emptiness
//!
//! A cell is either `Cell::Empty` or `Cell::Occupied(TileId)`. Tile values
//! are always real powers of two; there is no numeric "empty" value.
//!
//! ```
//! use tile_merge::core::{Tile, TileValue};
//!
//! let two = TileValue::new(2).unwrap();
//! assert_eq!(two.doubled().map(TileValue::get), Some(4));
//! assert!(TileValue::new(3).is_none());
//!
//! let tile = Tile::new(two);
//! assert!(!tile.merged);
//! ```

use serde::{Deserialize, Serialize};

/// Stable identifier of a tile within one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// A tile value: a power of two, at least 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TileValue(u32);

impl TileValue {
    /// The smallest tile value.
    pub const TWO: TileValue = TileValue(2);

    /// The second spawn value.
    pub const FOUR: TileValue = TileValue(4);

    /// The classic win tile.
    pub const DEFAULT_WIN: TileValue = TileValue(2048);

    /// The largest value a `u32` holds. Tiles of this value never merge.
    pub const MAX: TileValue = TileValue(1 << 31);

    /// Create a value, returning `None` unless `value` is a power of two ≥ 2.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value >= 2 && value.is_power_of_two() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// The numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The value produced by merging two tiles of this value, or `None` for
    /// `TileValue::MAX`.
    #[must_use]
    pub const fn doubled(self) -> Option<Self> {
        match self.0.checked_mul(2) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// True if a tile of this value can merge with a tile of `other`.
    #[must_use]
    pub const fn merges_with(self, other: TileValue) -> bool {
        self.0 == other.0 && self.0 < Self::MAX.0
    }

    /// Base-two exponent (2 → 1, 4 → 2, ...).
    #[must_use]
    pub const fn exponent(self) -> u32 {
        self.0.trailing_zeros()
    }
}

impl TryFrom<u32> for TileValue {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        TileValue::new(value).ok_or_else(|| format!("{value} is not a power of two >= 2"))
    }
}

impl From<TileValue> for u32 {
    fn from(value: TileValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for TileValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A numbered tile.
///
/// `merged` is set only on the tile produced by a merge, and only until the
/// next move starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub value: TileValue,
    pub merged: bool,
}

impl Tile {
    /// A fresh, unmerged tile.
    #[must_use]
    pub const fn new(value: TileValue) -> Self {
        Self {
            value,
            merged: false,
        }
    }

    /// A tile produced by merging two tiles of `source` value, or `None` if
    /// the result would not fit.
    #[must_use]
    pub const fn merged_from(source: TileValue) -> Option<Self> {
        match source.doubled() {
            Some(value) => Some(Self {
                value,
                merged: true,
            }),
            None => None,
        }
    }
}

/// Contents of one grid slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(TileId),
}

impl Cell {
    /// Tile id in this cell, if any.
    #[must_use]
    pub const fn tile_id(self) -> Option<TileId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_value_validation() {
        assert!(TileValue::new(0).is_none());
        assert!(TileValue::new(1).is_none());
        assert!(TileValue::new(6).is_none());
        assert_eq!(TileValue::new(2048).map(TileValue::get), Some(2048));
    }

    #[test]
    fn test_doubled_and_exponent() {
        let v = TileValue::new(8).unwrap();
        assert_eq!(v.doubled().map(TileValue::get), Some(16));
        assert_eq!(v.exponent(), 3);

        let max = TileValue::new(1 << 31).unwrap();
        assert_eq!(max, TileValue::MAX);
        assert_eq!(max.doubled(), None);
    }

    #[test]
    fn test_largest_value_never_merges() {
        let half = TileValue::new(1 << 30).unwrap();
        assert!(half.merges_with(half));
        assert!(!half.merges_with(TileValue::MAX));
        assert!(!TileValue::MAX.merges_with(TileValue::MAX));
    }

    #[test]
    fn test_merged_from() {
        let tile = Tile::merged_from(TileValue::FOUR).unwrap();
        assert_eq!(tile.value.get(), 8);
        assert!(tile.merged);
        assert_eq!(Tile::merged_from(TileValue::MAX), None);
    }

    #[test]
    fn test_cell_default_is_empty() {
        assert!(Cell::default().is_empty());
        assert_eq!(Cell::Occupied(TileId(3)).tile_id(), Some(TileId(3)));
    }

    #[test]
    fn test_tile_value_serde() {
        let v = TileValue::new(64).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "64");
        let back: TileValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);

        assert!(serde_json::from_str::<TileValue>("12").is_err());
    }
}
