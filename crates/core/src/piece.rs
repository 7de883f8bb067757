//! Piece module - shape geometry, movement and rotation
//!
//! A piece is four offsets around a center. Offsets are integers or integers + 0.5,
//! stored exactly in half-cell units (`2 * offset`). Half offsets let 2-wide shapes
//! rotate about a cell corner without a rotation-state table.
//!
//! Absolute cells round half coordinates toward +∞: `floor(center + offset + 0.5)`.
//!
//! Collision rules:
//! - Falling and horizontal movement treat rows above the grid (y < 0) as open,
//!   bounded only by the side walls.
//! - Rotation requires every rotated cell to be inside the grid and empty.

use crate::grid::Field;
use crate::rng::RandomSource;
use crate::types::{Rgb, ShapeKind, FALL_SPEED_CELLS_PER_SEC, SPAWN_X, SPAWN_Y};

/// Shape offsets in half-cell units, before any rotation.
pub fn shape_offsets(kind: ShapeKind) -> [(i8, i8); 4] {
    match kind {
        ShapeKind::I => [(1, 1), (3, 1), (-1, 1), (-3, 1)],
        ShapeKind::J => [(0, 0), (2, 0), (-2, 0), (-2, -2)],
        ShapeKind::L => [(0, 0), (2, 0), (2, -2), (-2, 0)],
        ShapeKind::O => [(1, 1), (1, -1), (-1, -1), (-1, 1)],
        ShapeKind::Z => [(0, 0), (2, 0), (0, -2), (-2, -2)],
        ShapeKind::S => [(0, 0), (0, -2), (2, -2), (-2, 0)],
        ShapeKind::T => [(0, 0), (0, -2), (2, 0), (-2, 0)],
    }
}

/// Rotate half-cell offsets by +90°: `(dx, dy) -> (-dy, dx)`.
pub fn rotate_offsets(offsets: [(i8, i8); 4]) -> [(i8, i8); 4] {
    offsets.map(|(dx, dy)| (-dy, dx))
}

/// Resolve `center + half_offset / 2` to a whole cell, ties toward +∞.
#[inline(always)]
fn resolve(center: i16, half_offset: i8) -> i16 {
    (2 * center + half_offset as i16 + 1).div_euclid(2)
}

/// Collision axis for [`Piece::is_colliding`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Would one step down collide?
    Vertical,
    /// Does the current position collide? Used after a tentative sideways shift.
    Horizontal,
}

/// Result of advancing the falling clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    /// Still falling; `rows` cells dropped this update.
    Falling { rows: u16 },
    /// The piece could not drop further and must be fixed into the grid.
    Landed,
}

/// A falling (or preview) piece
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    kind: ShapeKind,
    offsets: [(i8, i8); 4],
    x: i16,
    y: i16,
    color: Rgb,
    fall_progress: f64,
}

impl Piece {
    /// Create a piece at the spawn center
    pub fn new(kind: ShapeKind, color: Rgb) -> Self {
        Self {
            kind,
            offsets: shape_offsets(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
            color,
            fall_progress: 0.0,
        }
    }

    /// Random shape and color, independently drawn
    pub fn random(rng: &mut impl RandomSource) -> Self {
        let kind = rng.pick_shape();
        let color = rng.pick_color();
        Self::new(kind, color)
    }

    pub fn at(mut self, x: i16, y: i16) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Center position (whole cells)
    pub fn center(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    /// Current offsets in half-cell units
    pub fn offsets(&self) -> [(i8, i8); 4] {
        self.offsets
    }

    pub fn fall_progress(&self) -> f64 {
        self.fall_progress
    }

    /// The 4 absolute grid cells the piece covers
    pub fn cells(&self) -> [(i16, i16); 4] {
        Self::cells_of(self.offsets, self.x, self.y)
    }

    fn cells_of(offsets: [(i8, i8); 4], x: i16, y: i16) -> [(i16, i16); 4] {
        offsets.map(|(dx, dy)| (resolve(x, dx), resolve(y, dy)))
    }

    /// Cells normalized so the bounding box starts at (0, 0), with its size.
    ///
    /// Used for the next-piece preview.
    pub fn preview_cells(&self) -> ([(u8, u8); 4], (u8, u8)) {
        let cells = Self::cells_of(self.offsets, 0, 0);
        let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
        let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
        let max_x = cells.iter().map(|c| c.0).max().unwrap_or(0);
        let max_y = cells.iter().map(|c| c.1).max().unwrap_or(0);
        let normalized = cells.map(|(x, y)| ((x - min_x) as u8, (y - min_y) as u8));
        let size = ((max_x - min_x + 1) as u8, (max_y - min_y + 1) as u8);
        (normalized, size)
    }

    /// A cell blocks the piece while falling or shifting.
    ///
    /// Above the grid only the side walls count.
    fn blocks(field: &impl Field, x: i16, y: i16) -> bool {
        if y < 0 {
            x < 0 || x >= field.width()
        } else {
            field.is_occupied(x, y)
        }
    }

    pub fn is_colliding(&self, field: &impl Field, axis: Axis) -> bool {
        let cells = self.cells();
        match axis {
            Axis::Vertical => cells.iter().any(|&(x, y)| Self::blocks(field, x, y + 1)),
            Axis::Horizontal => cells.iter().any(|&(x, y)| Self::blocks(field, x, y)),
        }
    }

    /// Shift one column left (`-1`) or right (`+1`).
    ///
    /// The shift is rolled back if the new position collides. Returns whether the
    /// piece moved.
    pub fn shift(&mut self, field: &impl Field, direction: i8) -> bool {
        let dx = direction.signum() as i16;
        if dx == 0 {
            return false;
        }
        self.x += dx;
        if self.is_colliding(field, Axis::Horizontal) {
            self.x -= dx;
            return false;
        }
        true
    }

    /// Rotate by +90°, all or nothing.
    ///
    /// Any rotated cell outside the grid (including above it) or on an occupied cell
    /// cancels the whole rotation. Returns whether the piece rotated.
    pub fn rotate(&mut self, field: &impl Field) -> bool {
        let rotated = rotate_offsets(self.offsets);
        let blocked = Self::cells_of(rotated, self.x, self.y)
            .iter()
            .any(|&(x, y)| field.is_occupied(x, y));
        if blocked {
            return false;
        }
        self.offsets = rotated;
        true
    }

    /// Advance the falling clock by `elapsed_ms`.
    ///
    /// Each whole cell of progress is one collision-checked step down. The first
    /// blocked step reports [`Fall::Landed`] and stops the update.
    pub fn update(&mut self, field: &impl Field, elapsed_ms: u32) -> Fall {
        self.fall_progress += FALL_SPEED_CELLS_PER_SEC * elapsed_ms as f64 / 1000.0;

        let mut rows = 0u16;
        while self.fall_progress >= 1.0 {
            if self.is_colliding(field, Axis::Vertical) {
                return Fall::Landed;
            }
            self.fall_progress -= 1.0;
            self.y += 1;
            rows += 1;
        }

        Fall::Falling { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::PALETTE;

    #[test]
    fn test_resolve_rounds_half_up() {
        assert_eq!(resolve(5, 1), 6);
        assert_eq!(resolve(5, -1), 5);
        assert_eq!(resolve(5, -3), 4);
        assert_eq!(resolve(5, 2), 6);
        assert_eq!(resolve(-1, 1), 0);
        assert_eq!(resolve(-1, -1), -1);
        assert_eq!(resolve(-1, -3), -2);
    }

    #[test]
    fn test_spawn_cells_of_i_piece() {
        let piece = Piece::new(ShapeKind::I, PALETTE[0]);
        let mut cells = piece.cells();
        cells.sort();
        assert_eq!(cells, [(4, 0), (5, 0), (6, 0), (7, 0)]);
    }

    #[test]
    fn test_spawn_cells_of_t_piece() {
        let piece = Piece::new(ShapeKind::T, PALETTE[0]);
        assert_eq!(piece.cells(), [(5, -1), (5, -2), (6, -1), (4, -1)]);
    }

    #[test]
    fn test_rotate_uses_exact_transform() {
        assert_eq!(
            rotate_offsets([(0, 0), (0, -2), (2, 0), (-2, 0)]),
            [(0, 0), (2, 0), (0, 2), (0, -2)]
        );
    }

    #[test]
    fn test_rotation_above_grid_is_rejected() {
        let grid = Grid::new();
        // T at spawn: rotating puts a cell at y = -2.
        let mut piece = Piece::new(ShapeKind::T, PALETTE[0]);
        let before = piece.offsets();
        assert!(!piece.rotate(&grid));
        assert_eq!(piece.offsets(), before);
    }

    #[test]
    fn test_shift_allowed_above_grid() {
        let grid = Grid::new();
        let mut piece = Piece::new(ShapeKind::T, PALETTE[0]);
        assert!(piece.shift(&grid, -1));
        assert_eq!(piece.center(), (4, -1));
    }

    #[test]
    fn test_update_accumulates_sub_cell_progress() {
        let grid = Grid::new();
        let mut piece = Piece::new(ShapeKind::T, PALETTE[0]).at(5, 5);

        // 3 cells/s * 0.2s = 0.6 cell
        assert_eq!(piece.update(&grid, 200), Fall::Falling { rows: 0 });
        assert_eq!(piece.center(), (5, 5));

        // +0.6 = 1.2 cells: one step
        assert_eq!(piece.update(&grid, 200), Fall::Falling { rows: 1 });
        assert_eq!(piece.center(), (5, 6));
        assert!(piece.fall_progress() < 1.0);
    }

    #[test]
    fn test_preview_cells_are_normalized() {
        let piece = Piece::new(ShapeKind::I, PALETTE[0]);
        let (cells, size) = piece.preview_cells();
        assert_eq!(size, (4, 1));
        assert!(cells.iter().all(|&(x, y)| x < 4 && y == 0));

        let piece = Piece::new(ShapeKind::O, PALETTE[0]);
        assert_eq!(piece.preview_cells().1, (2, 2));
    }
}
