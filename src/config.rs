//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::high_score::DEFAULT_FILE;

#[derive(Debug, Clone, Parser)]
#[command(name = "falling-blocks", version, about = "Falling-block puzzle game for the terminal")]
pub struct Args {
    /// Seed for the piece generator (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Where the high score is kept
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FILE)]
    pub high_score_file: PathBuf,

    /// Disable sound
    #[arg(long)]
    pub mute: bool,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// The explicit seed, or one derived from the current time.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
