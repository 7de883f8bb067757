//! Terminal front end for the falling-blocks game.
//!
//! [`GameView`] draws a [`core::GameSnapshot`] into a [`FrameBuffer`] without touching
//! game state, and [`TerminalRenderer`] puts frames on screen with crossterm. Grid cells
//! are two characters wide so blocks look square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
