//! Game state module - manages the complete game state
//!
//! This module ties together the grid, the current and next pieces, the random source
//! and scoring. It handles the falling clock, piece movement and rotation, landing,
//! the line-clear flash sequence and restart.
//!
//! The line clear is a sub-state advanced by [`GameState::tick`]: five flash steps
//! 100ms apart, then the rows are removed and scored. Piece falling and player input
//! are suspended until it completes.

use arrayvec::ArrayVec;

use crate::grid::{Grid, MAX_FULL_ROWS};
use crate::piece::{Fall, Piece};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{multi_line_bonus, row_points};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PreviewSnapshot};
use crate::types::*;

/// Sound events buffered between two drains
pub const MAX_PENDING_EVENTS: usize = 32;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing,
    /// Line-clear flash in progress; input is dropped.
    ClearingLines,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LineClear {
    rows: ArrayVec<usize, MAX_FULL_ROWS>,
    step: u8,
    elapsed_ms: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    grid: Grid,
    current: Piece,
    next: Piece,
    rng: R,
    score: u32,
    lines: u32,
    high_score: u32,
    phase: Phase,
    line_clear: Option<LineClear>,
    events: ArrayVec<SoundEvent, MAX_PENDING_EVENTS>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Pieces fixed into the grid this episode.
    pieces_landed: u32,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game drawing pieces from `rng`
    pub fn with_rng(mut rng: R) -> Self {
        let current = Piece::random(&mut rng);
        let next = Piece::random(&mut rng);
        Self::from_parts(Grid::new(), current, next, rng)
    }

    /// Assemble a game from an existing grid and pieces
    pub fn from_parts(grid: Grid, current: Piece, next: Piece, rng: R) -> Self {
        Self {
            grid,
            current,
            next,
            rng,
            score: 0,
            lines: 0,
            high_score: 0,
            phase: Phase::Playing,
            line_clear: None,
            events: ArrayVec::new(),
            episode_id: 0,
            pieces_landed: 0,
        }
    }

    /// Seed the high score (usually the persisted value)
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score.max(self.score);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_clearing(&self) -> bool {
        self.phase == Phase::ClearingLines
    }

    /// Current flash step while a line clear is running
    pub fn flash_step(&self) -> Option<u8> {
        self.line_clear.as_ref().map(|lc| lc.step)
    }

    /// Rows being cleared while a line clear is running
    pub fn clearing_rows(&self) -> &[usize] {
        self.line_clear
            .as_ref()
            .map(|lc| lc.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_landed(&self) -> u32 {
        self.pieces_landed
    }

    /// Take the sound events emitted since the last call.
    pub fn take_sound_events(&mut self) -> ArrayVec<SoundEvent, MAX_PENDING_EVENTS> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: SoundEvent) {
        // A full buffer means nobody is draining; dropping is fine.
        let _ = self.events.try_push(event);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_rows(&mut out.grid);

        out.active = if self.is_game_over() {
            None
        } else {
            Some(ActiveSnapshot::from(&self.current))
        };
        out.next = Some(PreviewSnapshot::from(&self.next));
        out.score = self.score;
        out.lines = self.lines;
        out.high_score = self.high_score;
        out.game_over = self.is_game_over();
        out.clearing = self.is_clearing();
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player action.
    ///
    /// Move and rotate emit their sound on every attempt, including rejected ones.
    /// While a line clear runs or after game over, movement is dropped. Restart works
    /// in every phase except a running line clear.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                if self.is_clearing() {
                    return false;
                }
                self.restart();
                true
            }
            _ if self.phase != Phase::Playing => false,
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::Rotate => self.try_rotate(),
        }
    }

    pub(crate) fn try_move(&mut self, direction: i8) -> bool {
        self.emit(SoundEvent::Move);
        self.current.shift(&self.grid, direction)
    }

    pub(crate) fn try_rotate(&mut self) -> bool {
        self.emit(SoundEvent::Rotate);
        self.current.rotate(&self.grid)
    }

    /// Main game tick - advance the falling clock or the line-clear sequence.
    ///
    /// Returns true when the visible state changed.
    pub fn tick(&mut self, elapsed_ms: u32, soft_drop: bool) -> bool {
        match self.phase {
            Phase::GameOver => false,
            Phase::ClearingLines => {
                self.advance_line_clear(elapsed_ms);
                true
            }
            Phase::Playing => {
                let scale = if soft_drop { SOFT_DROP_MULTIPLIER } else { 1 };
                let scaled_ms = elapsed_ms.saturating_mul(scale);
                let changed = match self.current.update(&self.grid, scaled_ms) {
                    Fall::Falling { rows } => rows > 0,
                    Fall::Landed => {
                        self.land();
                        true
                    }
                };

                if self.phase == Phase::Playing {
                    let rows = self.grid.full_rows();
                    if !rows.is_empty() {
                        self.start_line_clear(rows);
                        return true;
                    }
                }

                changed
            }
        }
    }

    /// Fix the current piece into the grid and promote the next piece.
    ///
    /// A piece touching the top row ends the game and is not written.
    fn land(&mut self) {
        let cells = self.current.cells();
        if cells.iter().any(|&(_, y)| y <= 0) {
            self.phase = Phase::GameOver;
            log::info!(
                "game over: episode={} score={} lines={} high_score={}",
                self.episode_id,
                self.score,
                self.lines,
                self.high_score
            );
            return;
        }

        let color = self.current.color();
        for &(x, y) in &cells {
            self.grid.set(x, y, color);
        }
        self.emit(SoundEvent::Land);
        self.pieces_landed = self.pieces_landed.wrapping_add(1);
        log::debug!("landed {:?} at {:?}", self.current.kind(), cells);

        let spawned = Piece::random(&mut self.rng);
        self.current = std::mem::replace(&mut self.next, spawned);
    }

    fn start_line_clear(&mut self, rows: ArrayVec<usize, MAX_FULL_ROWS>) {
        self.emit(SoundEvent::LineClear);
        flash_rows(&mut self.grid, &rows, 0);
        log::debug!("line clear started: rows={:?}", rows.as_slice());
        self.line_clear = Some(LineClear {
            rows,
            step: 0,
            elapsed_ms: 0,
        });
        self.phase = Phase::ClearingLines;
    }

    fn advance_line_clear(&mut self, elapsed_ms: u32) {
        let Some(lc) = self.line_clear.as_mut() else {
            self.phase = Phase::Playing;
            return;
        };

        lc.elapsed_ms = lc.elapsed_ms.saturating_add(elapsed_ms);
        while lc.elapsed_ms >= FLASH_STEP_MS {
            lc.elapsed_ms -= FLASH_STEP_MS;
            lc.step += 1;
            if lc.step >= FLASH_STEPS {
                self.finish_line_clear();
                return;
            }
            flash_rows(&mut self.grid, &lc.rows, lc.step);
        }
    }

    fn finish_line_clear(&mut self) {
        let Some(lc) = self.line_clear.take() else {
            return;
        };

        self.grid.clear_rows(&lc.rows);
        for _ in &lc.rows {
            self.lines += 1;
            self.score = self.score.saturating_add(row_points());
            self.high_score = self.high_score.max(self.score);
        }
        self.score = self.score.saturating_add(multi_line_bonus(lc.rows.len()));
        // Unlike the per-row update, this one also lets the bonus raise the high score,
        // so TOP never reads lower than SCORE.
        self.high_score = self.high_score.max(self.score);

        log::debug!(
            "cleared {} rows: score={} lines={}",
            lc.rows.len(),
            self.score,
            self.lines
        );
        self.phase = Phase::Playing;
    }

    /// Start a new episode: empty grid, fresh pieces, zero score. The high score stays.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.lines = 0;
        self.current = Piece::random(&mut self.rng);
        self.next = Piece::random(&mut self.rng);
        self.phase = Phase::Playing;
        self.line_clear = None;
        self.pieces_landed = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        log::info!(
            "restart: episode={} high_score={}",
            self.episode_id,
            self.high_score
        );
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Recolor the cleared rows for flash step `step`: even steps full, odd steps half.
fn flash_rows(grid: &mut Grid, rows: &[usize], step: u8) {
    let color = if step % 2 == 0 {
        FLASH_COLOR
    } else {
        FLASH_COLOR.halved()
    };
    for &y in rows {
        grid.fill_row(y, color);
    }
}
