//! Property tests for piece geometry and grid clearing.
//!
//! Invariants covered:
//! - Four rotations bring any shape back to its starting cells.
//! - A successful shift followed by the opposite shift restores the position.
//! - Shifting over a random grid never leaves the piece outside the walls or on a block.
//! - Every placement keeps exactly four distinct cells.
//! - Clearing full rows removes exactly their cells and keeps the grid size.

use falling_blocks::core::{Axis, Grid, Piece};
use falling_blocks::types::{ShapeKind, GRID_HEIGHT, GRID_WIDTH, PALETTE};
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = ShapeKind> {
    (0..ShapeKind::ALL.len()).prop_map(|i| ShapeKind::ALL[i])
}

fn sorted(mut cells: [(i16, i16); 4]) -> [(i16, i16); 4] {
    cells.sort_unstable();
    cells
}

proptest! {
    #[test]
    fn four_rotations_are_identity(kind in any_kind(), x in 2i16..10, y in 2i16..22) {
        let grid = Grid::new();
        let mut piece = Piece::new(kind, PALETTE[0]).at(x, y);
        let start = sorted(piece.cells());
        for _ in 0..4 {
            prop_assert!(piece.rotate(&grid));
        }
        prop_assert_eq!(sorted(piece.cells()), start);
    }

    #[test]
    fn shift_is_reversible(kind in any_kind(), x in 0i16..12, y in -2i16..22, left in any::<bool>()) {
        let grid = Grid::new();
        let mut piece = Piece::new(kind, PALETTE[0]).at(x, y);
        prop_assume!(!piece.is_colliding(&grid, Axis::Horizontal));
        let (dir, back) = if left { (-1, 1) } else { (1, -1) };
        let before = piece.center();
        if piece.shift(&grid, dir) {
            prop_assert!(piece.shift(&grid, back));
        }
        prop_assert_eq!(piece.center(), before);
    }

    #[test]
    fn shift_never_enters_walls_or_blocks(
        kind in any_kind(),
        blocks in proptest::collection::vec((0i16..GRID_WIDTH as i16, 0i16..GRID_HEIGHT as i16), 0..60),
        moves in proptest::collection::vec(any::<bool>(), 1..30),
    ) {
        let mut grid = Grid::new();
        for &(x, y) in &blocks {
            grid.set(x, y, PALETTE[3]);
        }
        let mut piece = Piece::new(kind, PALETTE[0]);
        prop_assume!(!piece.is_colliding(&grid, Axis::Horizontal));

        for left in moves {
            piece.shift(&grid, if left { -1 } else { 1 });
            for (x, y) in piece.cells() {
                prop_assert!((0..GRID_WIDTH as i16).contains(&x));
                prop_assert!(y < 0 || !grid.is_occupied(x, y));
            }
        }
    }

    #[test]
    fn cells_stay_distinct(kind in any_kind(), rotations in 0usize..4) {
        let grid = Grid::new();
        let mut piece = Piece::new(kind, PALETTE[0]).at(5, 10);
        for _ in 0..rotations {
            piece.rotate(&grid);
        }
        let cells = sorted(piece.cells());
        for pair in cells.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn clearing_full_rows_removes_their_cells(
        full in proptest::collection::btree_set(0usize..GRID_HEIGHT as usize, 0..6),
        extra in proptest::collection::vec((0i16..GRID_WIDTH as i16 - 1, 0i16..GRID_HEIGHT as i16), 0..40),
    ) {
        let mut grid = Grid::new();
        for &(x, y) in &extra {
            // Column 11 stays empty so these cells never complete a row.
            grid.set(x, y, PALETTE[1]);
        }
        for &y in &full {
            grid.fill_row(y, PALETTE[2]);
        }
        let before = grid.occupied_count();
        let rows: Vec<usize> = grid.full_rows().to_vec();
        prop_assert_eq!(rows.len(), full.len());

        grid.clear_rows(&rows);
        prop_assert_eq!(grid.occupied_count(), before - full.len() * GRID_WIDTH as usize);
        prop_assert_eq!(grid.cells().len(), GRID_WIDTH as usize * GRID_HEIGHT as usize);
        prop_assert!(grid.full_rows().is_empty());
    }
}
