//! High-score persistence.
//!
//! The file holds a single decimal integer as plain text. A missing file means no high
//! score yet. [`HighScoreGuard`] writes the best score back when it goes out of scope,
//! so the value survives error returns and panics in the game loop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE: &str = "top.scr";

#[derive(Debug, thiserror::Error)]
pub enum HighScoreError {
    #[error("cannot access high score file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {} does not hold a number: {content:?}", path.display())]
    Malformed { path: PathBuf, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score. A missing file reads as 0.
    pub fn load(&self) -> Result<u32, HighScoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(HighScoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        content
            .trim()
            .parse()
            .map_err(|_| HighScoreError::Malformed {
                path: self.path.clone(),
                content,
            })
    }

    /// Like [`load`](Self::load), but logs the problem and starts from 0.
    pub fn load_or_default(&self) -> u32 {
        match self.load() {
            Ok(score) => {
                log::info!("high score {score} loaded from {}", self.path.display());
                score
            }
            Err(err) => {
                log::warn!("{err}; starting from 0");
                0
            }
        }
    }

    pub fn save(&self, score: u32) -> Result<(), HighScoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Holds the best score seen this session and writes it on drop.
#[derive(Debug)]
pub struct HighScoreGuard {
    store: HighScoreStore,
    best: u32,
    written: bool,
}

impl HighScoreGuard {
    pub fn new(store: HighScoreStore, initial: u32) -> Self {
        Self {
            store,
            best: initial,
            written: false,
        }
    }

    /// Track a new high-score value. Lower values are ignored.
    pub fn record(&mut self, score: u32) {
        if score > self.best {
            self.best = score;
            self.written = false;
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Write now and report the result instead of logging it.
    pub fn finish(mut self) -> Result<(), HighScoreError> {
        self.written = true;
        self.store.save(self.best)
    }
}

impl Drop for HighScoreGuard {
    fn drop(&mut self) {
        if self.written {
            return;
        }
        if let Err(err) = self.store.save(self.best) {
            log::warn!("{err}");
        }
    }
}
