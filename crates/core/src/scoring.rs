//! Scoring module - line clear points
//!
//! Every cleared row is worth `POINTS_PER_CELL * GRID_WIDTH`. A clear of `n` rows
//! also adds `(n - 1) * MULTI_LINE_BONUS` once, so a single row earns no bonus and the
//! bonus grows linearly with the row count.

use crate::types::{GRID_WIDTH, MULTI_LINE_BONUS, POINTS_PER_CELL};

/// Points for one cleared row
pub const fn row_points() -> u32 {
    POINTS_PER_CELL * GRID_WIDTH as u32
}

/// Bonus added once after `rows` rows were cleared together
pub fn multi_line_bonus(rows: usize) -> u32 {
    (rows.saturating_sub(1) as u32) * MULTI_LINE_BONUS
}
