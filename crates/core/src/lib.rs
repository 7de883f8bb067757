//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management and simulation logic.
//! It has **no I/O**: rendering, audio and persistence live in other crates and talk
//! to the core through [`GameSnapshot`] and the drained [`types::SoundEvent`]s.
//!
//! - **Deterministic**: the random source is injected; same seed, same game
//! - **Testable**: every rule is reachable without a terminal
//! - **Fast**: fixed-size storage, no allocation per tick
//!
//! # Module Structure
//!
//! - [`grid`]: 12x24 playfield with collision queries and row clearing
//! - [`piece`]: shape geometry in half-cell units, movement, rotation, falling
//! - [`game_state`]: current/next piece, scoring, line-clear sequence, restart
//! - [`rng`]: injected random source and a seedable LCG
//! - [`scoring`]: per-row points and the multi-line bonus
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::GameState;
//! use falling_blocks_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick(16, false);
//!
//! assert!(!game.is_game_over());
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the elapsed
//! milliseconds and whether soft drop is held. Pieces fall 3 cells per second, 10x
//! faster during soft drop. A line clear flashes 5 times, 100ms apart.

pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use falling_blocks_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, Phase};
pub use grid::{Field, Grid};
pub use piece::{Axis, Fall, Piece};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{multi_line_bonus, row_points};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot};
