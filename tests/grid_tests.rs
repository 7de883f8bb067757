//! Grid tests - bounds, row detection and row clearing

use falling_blocks::core::{Field, Grid};
use falling_blocks::types::{Rgb, GRID_HEIGHT, GRID_WIDTH, PALETTE};

const W: i16 = GRID_WIDTH as i16;
const H: i16 = GRID_HEIGHT as i16;

fn fill_row_except(grid: &mut Grid, y: i16, gap: Option<i16>, color: Rgb) {
    for x in 0..W {
        if Some(x) != gap {
            grid.set(x, y, color);
        }
    }
}

#[test]
fn test_grid_new_is_empty_12_by_24() {
    let grid = Grid::new();
    assert_eq!(grid.width(), 12);
    assert_eq!(grid.height(), 24);
    assert_eq!(grid.cells().len(), 12 * 24);
    assert!(grid.is_empty());
}

#[test]
fn test_grid_out_of_bounds_is_occupied() {
    let grid = Grid::new();
    assert!(grid.is_occupied(-1, 0));
    assert!(grid.is_occupied(W, 0));
    assert!(grid.is_occupied(0, H));
    assert!(grid.is_occupied(0, -1));
    assert!(!grid.is_occupied(0, 0));
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, 0), Some(None));
}

#[test]
fn test_grid_set_out_of_bounds_is_ignored() {
    let mut grid = Grid::new();
    assert!(!grid.set(W, 3, PALETTE[0]));
    assert!(!grid.set(0, -1, PALETTE[0]));
    assert!(grid.is_empty());
}

#[test]
fn test_full_rows_needs_every_column() {
    let mut grid = Grid::new();
    fill_row_except(&mut grid, 23, None, PALETTE[1]);
    fill_row_except(&mut grid, 22, Some(7), PALETTE[1]);
    assert_eq!(grid.full_rows().as_slice(), &[23]);
}

#[test]
fn test_clear_rows_shifts_colors_down() {
    let mut grid = Grid::new();
    let marker = PALETTE[3];
    grid.set(2, 20, marker);
    grid.set(9, 21, PALETTE[4]);
    fill_row_except(&mut grid, 22, None, PALETTE[0]);
    fill_row_except(&mut grid, 23, None, PALETTE[0]);

    assert_eq!(grid.clear_rows(&[22, 23]), 2);

    assert_eq!(grid.get(2, 22), Some(Some(marker)));
    assert_eq!(grid.get(9, 23), Some(Some(PALETTE[4])));
    assert_eq!(grid.occupied_count(), 2);
    assert_eq!(grid.cells().len(), (W * H) as usize);
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut grid = Grid::new();
    fill_row_except(&mut grid, 10, None, PALETTE[0]);
    fill_row_except(&mut grid, 15, None, PALETTE[0]);
    grid.set(0, 12, PALETTE[5]);

    // Order and duplicates in the request do not matter.
    assert_eq!(grid.clear_rows(&[15, 10, 15]), 2);

    // Row 12 sits between the cleared rows: it moves down by one.
    assert_eq!(grid.get(0, 13), Some(Some(PALETTE[5])));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_field_trait_matches_grid() {
    let grid = Grid::new();
    assert_eq!(Field::width(&grid), W);
    assert_eq!(Field::height(&grid), H);
    assert!(Field::is_occupied(&grid, -1, 5));
}
