//! Keyboard input for the falling-blocks game.
//!
//! This module maps `crossterm` key events into [`crate::types::GameAction`]s and
//! tracks the held soft-drop state, including on terminals without key-release events.

pub mod handler;
pub mod map;

pub use falling_blocks_types as types;

pub use handler::InputHandler;
pub use map::{binding, handle_key_event, is_soft_drop_key, should_quit, Binding};
