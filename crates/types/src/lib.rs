//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, audio).
//!
//! # Grid Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 24 rows (indexed 0-23, row 0 is the top)
//! - **Spawn center**: (5, -1), one row above the visible grid
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal loop (~60 FPS) |
//! | `FALL_SPEED_CELLS_PER_SEC` | 3.0 | Base gravity |
//! | `SOFT_DROP_MULTIPLIER` | 10 | Soft drop time scale |
//! | `FLASH_STEPS` | 5 | Line-clear flash iterations |
//! | `FLASH_STEP_MS` | 100 | Time between flash iterations |
//!
//! # Scoring
//!
//! Each cleared row awards `POINTS_PER_CELL * GRID_WIDTH` (120 points on the default grid).
//! A clear of `n` rows additionally awards `(n - 1) * MULTI_LINE_BONUS` once.
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{ShapeKind, GRID_HEIGHT, GRID_WIDTH, PALETTE};
//!
//! assert_eq!(ShapeKind::ALL.len(), 7);
//! assert_eq!(PALETTE.len(), 6);
//!
//! assert_eq!(GRID_WIDTH, 12);
//! assert_eq!(GRID_HEIGHT, 24);
//! ```

/// Grid width in cells (12 columns)
pub const GRID_WIDTH: u8 = 12;

/// Grid height in cells (24 rows)
pub const GRID_HEIGHT: u8 = 24;

/// Spawn column of the piece center
pub const SPAWN_X: i16 = 5;

/// Spawn row of the piece center (one row above the grid)
pub const SPAWN_Y: i16 = -1;

/// Frame interval of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base gravity in cells per second
pub const FALL_SPEED_CELLS_PER_SEC: f64 = 3.0;

/// Soft drop speeds up the falling clock by this factor.
pub const SOFT_DROP_MULTIPLIER: u32 = 10;

/// How long a soft drop stays held between two auto-repeat presses.
///
/// Terminals that do not report key releases only send auto-repeat presses.
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// How long the first soft-drop press stays held while waiting for auto-repeat to start.
///
/// Covers the usual keyboard repeat delay (250 to 600ms).
pub const SOFT_DROP_REPEAT_DELAY_MS: u32 = 650;

/// Number of flash iterations in the line-clear animation
pub const FLASH_STEPS: u8 = 5;

/// Delay between two flash iterations
pub const FLASH_STEP_MS: u32 = 100;

/// Points per cleared cell; a cleared row awards `POINTS_PER_CELL * GRID_WIDTH`.
pub const POINTS_PER_CELL: u32 = 10;

/// Bonus per additional row in a multi-row clear.
pub const MULTI_LINE_BONUS: u32 = 25;

/// Counters are displayed zero-padded to this many digits.
pub const COUNTER_DIGITS: usize = 6;


/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Half-brightness version of this color.
    pub const fn halved(self) -> Self {
        Self {
            r: self.r / 2,
            g: self.g / 2,
            b: self.b / 2,
        }
    }
}

/// Piece colors; one is drawn uniformly at every spawn.
pub const PALETTE: [Rgb; 6] = [
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 255),
];

/// Full-brightness color of the line-clear flash
pub const FLASH_COLOR: Rgb = Rgb::new(0, 255, 0);

/// The seven piece shapes
///
/// The shape only decides the initial cell offsets. Rotation state lives in the
/// offsets themselves, so there is no rotation enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    Z,
    S,
    T,
}

impl ShapeKind {
    /// All shapes in draw order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::T,
    ];
}

/// Player commands applied to the game state
///
/// Soft drop is not an action: it is a held flag passed to every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90°
    Rotate,
    /// Start a new game (score and grid reset, high score kept)
    Restart,
}

/// Discrete sound cues emitted by the core.
///
/// The core never plays anything itself; the front end drains these once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    Move,
    Rotate,
    Land,
    LineClear,
}

impl SoundEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::Move => "move",
            SoundEvent::Rotate => "rotate",
            SoundEvent::Land => "land",
            SoundEvent::LineClear => "lineClear",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Rgb)`: Occupied cell with its color
pub type Cell = Option<Rgb>;
