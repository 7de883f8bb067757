//! Grid module - manages the playfield
//!
//! The grid is a 12x24 field where each cell is either empty or holds the color of a
//! landed piece. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..23 (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Cell, Rgb, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Upper bound on rows reported by [`Grid::full_rows`]
pub const MAX_FULL_ROWS: usize = GRID_HEIGHT as usize;

/// Read-only collision queries a falling piece needs.
///
/// Out-of-bounds coordinates must report as occupied.
pub trait Field {
    fn width(&self) -> i16;
    fn height(&self) -> i16;
    fn is_occupied(&self, x: i16, y: i16) -> bool;
}

/// The playfield - 12 columns x 24 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i16 || y < 0 || y >= GRID_HEIGHT as i16 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Mark cell (x, y) occupied with `color`
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, color: Rgb) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = Some(color);
                true
            }
            None => false,
        }
    }

    /// Check if position is blocked: occupied, or outside the grid
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        let start = y * GRID_WIDTH as usize;
        let end = start + GRID_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, ascending (top to bottom)
    pub fn full_rows(&self) -> ArrayVec<usize, MAX_FULL_ROWS> {
        (0..GRID_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Clear a row and shift all rows above it down by one.
    /// Row 0 becomes empty. Returns false if `y` is out of bounds.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }

        let width = GRID_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }

        true
    }

    /// Clear every listed row.
    ///
    /// Rows are removed one at a time in ascending order. Removing row `y` only moves
    /// rows with a smaller index, so the larger indices still in the list stay valid.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut sorted: ArrayVec<usize, MAX_FULL_ROWS> = ArrayVec::new();
        for &y in rows {
            if y < GRID_HEIGHT as usize && !sorted.contains(&y) && !sorted.is_full() {
                sorted.push(y);
            }
        }
        sorted.sort_unstable();

        for &y in &sorted {
            self.clear_row(y);
        }
        sorted.len()
    }

    /// Recolor every cell of row `y` (marks them occupied)
    pub fn fill_row(&mut self, y: usize, color: Rgb) {
        if y >= GRID_HEIGHT as usize {
            return;
        }
        let start = y * GRID_WIDTH as usize;
        let end = start + GRID_WIDTH as usize;
        self.cells[start..end].fill(Some(color));
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy the grid into a row-major 2D array (for snapshots).
    pub fn write_rows(&self, out: &mut [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) {
        let width = GRID_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for Grid {
    fn width(&self) -> i16 {
        GRID_WIDTH as i16
    }

    fn height(&self) -> i16 {
        GRID_HEIGHT as i16
    }

    fn is_occupied(&self, x: i16, y: i16) -> bool {
        Grid::is_occupied(self, x, y)
    }
}
