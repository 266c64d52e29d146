//! Grid integration tests.
//!
//! These tests exercise the board through its public API only: placing,
//! swapping, snapshots and the index invariants.

use tile_merge::core::{Cell, Direction, GridError, Position, Tile, TileValue};
use tile_merge::grid::{Grid, GridSnapshot};

fn tile(value: u32) -> Tile {
    Tile::new(TileValue::new(value).unwrap())
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_new_grid_is_empty() {
    for size in 2..=6 {
        let grid = Grid::new(size);
        assert_eq!(grid.size(), size);
        assert_eq!(grid.tile_count(), 0);
        assert_eq!(grid.empty_count(), size * size);
        assert!(!grid.is_full());
        assert!(grid.check_invariants().is_ok());
    }
}

#[test]
#[should_panic(expected = "at least 2x2")]
fn test_grid_too_small_panics() {
    let _ = Grid::new(1);
}

#[test]
fn test_from_rows_and_back() {
    let rows = vec![vec![2, 0, 4], vec![0, 8, 0], vec![16, 0, 2]];
    let grid = Grid::from_rows(&rows);
    assert_eq!(grid.snapshot().to_rows(), rows);
    assert_eq!(grid.tile_count(), 5);
    assert_eq!(grid.total_value(), 32);
    assert_eq!(grid.max_value(), TileValue::new(16));
}

#[test]
fn test_from_snapshot_rebuilds_indexes() {
    let grid = Grid::from_rows(&[[2, 4], [0, 8]]);
    let rebuilt = Grid::from_snapshot(&grid.snapshot()).unwrap();

    assert_eq!(rebuilt, grid);
    assert!(rebuilt.check_invariants().is_ok());
    for (position, id, _) in rebuilt.iter() {
        assert_eq!(rebuilt.position_of(id), Some(position));
    }
}

#[test]
fn test_snapshot_serde_roundtrip() {
    let snapshot: GridSnapshot = Grid::from_rows(&[[2, 0], [0, 1024]]).snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GridSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

// =============================================================================
// Placement and removal
// =============================================================================

#[test]
fn test_place_remove_keep_invariants() {
    let mut grid = Grid::new(4);
    let a = grid.place(tile(2), Position::new(1, 1)).unwrap();
    let b = grid.place(tile(4), Position::new(3, 0)).unwrap();

    assert_ne!(a, b);
    assert_eq!(grid.cell(Position::new(1, 1)).unwrap(), Cell::Occupied(a));
    assert_eq!(grid.position_of(b), Some(Position::new(3, 0)));
    assert!(grid.check_invariants().is_ok());

    let removed = grid.remove(Position::new(1, 1)).unwrap();
    assert_eq!(removed.map(|t| t.value.get()), Some(2));
    assert_eq!(grid.tile(a), None);
    assert_eq!(grid.position_of(a), None);
    assert!(grid.is_empty_at(Position::new(1, 1)));
    assert!(grid.check_invariants().is_ok());
}

#[test]
fn test_place_errors() {
    let mut grid = Grid::new(2);
    grid.place(tile(2), Position::new(0, 0)).unwrap();

    assert_eq!(
        grid.place(tile(2), Position::new(0, 0)),
        Err(GridError::CellOccupied(Position::new(0, 0)))
    );
    assert!(matches!(
        grid.place(tile(2), Position::new(2, 0)),
        Err(GridError::OutOfBounds { .. })
    ));
}

#[test]
fn test_fill_grid() {
    let mut grid = Grid::new(3);
    for position in Position::all(3) {
        grid.place(tile(2), position).unwrap();
    }
    assert!(grid.is_full());
    assert!(grid.empty_positions().is_empty());
    assert!(grid.has_legal_merge());
}

// =============================================================================
// Swap
// =============================================================================

#[test]
fn test_swap_two_tiles_keeps_ids() {
    let mut grid = Grid::from_rows(&[[2, 4], [0, 0]]);
    let left = grid.cell(Position::new(0, 0)).unwrap().tile_id().unwrap();
    let right = grid.cell(Position::new(0, 1)).unwrap().tile_id().unwrap();

    grid.swap(Position::new(0, 0), Position::new(0, 1)).unwrap();

    assert_eq!(grid.snapshot().to_rows(), vec![vec![4, 2], vec![0, 0]]);
    assert_eq!(grid.position_of(left), Some(Position::new(0, 1)));
    assert_eq!(grid.position_of(right), Some(Position::new(0, 0)));
    assert!(grid.check_invariants().is_ok());
}

#[test]
fn test_swap_with_empty_and_both_empty() {
    let mut grid = Grid::from_rows(&[[2, 0], [0, 0]]);
    grid.swap(Position::new(0, 0), Position::new(1, 1)).unwrap();
    assert_eq!(grid.snapshot().to_rows(), vec![vec![0, 0], vec![0, 2]]);

    grid.swap(Position::new(0, 0), Position::new(0, 1)).unwrap();
    assert_eq!(grid.snapshot().to_rows(), vec![vec![0, 0], vec![0, 2]]);
    assert!(grid.check_invariants().is_ok());
}

#[test]
fn test_swap_out_of_bounds_changes_nothing() {
    let mut grid = Grid::from_rows(&[[2, 4], [8, 16]]);
    let before = grid.snapshot();
    assert!(grid.swap(Position::new(0, 0), Position::new(0, 5)).is_err());
    assert_eq!(grid.snapshot(), before);
}

// =============================================================================
// Neighbors
// =============================================================================

#[test]
fn test_neighbor_skips_gaps() {
    let grid = Grid::from_rows(&[[2, 0, 0, 8], [0; 4], [0; 4], [4, 0, 0, 0]]);

    let right = grid
        .neighbor_in_direction(Position::new(0, 0), Direction::Right)
        .unwrap();
    assert_eq!(right.position, Position::new(0, 3));
    assert_eq!(right.tile.value.get(), 8);

    let down = grid
        .neighbor_in_direction(Position::new(0, 0), Direction::Down)
        .unwrap();
    assert_eq!(down.position, Position::new(3, 0));

    assert!(grid
        .neighbor_in_direction(Position::new(0, 0), Direction::Up)
        .is_none());
    assert!(grid
        .neighbor_in_direction(Position::new(0, 3), Direction::Right)
        .is_none());
}

#[test]
fn test_legal_merge_detection() {
    assert!(!Grid::from_rows(&[[2, 4], [4, 2]]).has_legal_merge());
    assert!(Grid::from_rows(&[[2, 2], [4, 8]]).has_legal_merge());
    assert!(Grid::from_rows(&[[2, 4], [2, 8]]).has_legal_merge());
}

#[test]
fn test_display_draws_every_value() {
    let grid = Grid::from_rows(&[[2, 0], [0, 2048]]);
    let text = grid.to_string();
    assert!(text.contains('2'));
    assert!(text.contains("2048"));
}
