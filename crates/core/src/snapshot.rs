use crate::piece::Piece;
use crate::types::{Cell, Rgb, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub color: Rgb,
    /// Absolute cells; rows above the grid have negative y.
    pub cells: [(i16, i16); 4],
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            color: value.color(),
            cells: value.cells(),
        }
    }
}

/// Next-piece preview, normalized to its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewSnapshot {
    pub kind: ShapeKind,
    pub color: Rgb,
    pub cells: [(u8, u8); 4],
    /// Bounding box (width, height) in cells
    pub size: (u8, u8),
}

impl From<&Piece> for PreviewSnapshot {
    fn from(value: &Piece) -> Self {
        let (cells, size) = value.preview_cells();
        Self {
            kind: value.kind(),
            color: value.color(),
            cells,
            size,
        }
    }
}

/// Everything a renderer reads in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PreviewSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub clearing: bool,
    pub episode_id: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            next: None,
            score: 0,
            lines: 0,
            high_score: 0,
            game_over: false,
            clearing: false,
            episode_id: 0,
        }
    }
}
