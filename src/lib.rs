//! Falling Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and hosts the pieces that only the
//! binary needs: high-score persistence, command-line configuration and shutdown
//! signals.

pub use falling_blocks_audio as audio;
pub use falling_blocks_core as core;
pub use falling_blocks_input as input;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;

pub mod config;
pub mod high_score;
pub mod shutdown;
