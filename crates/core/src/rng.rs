//! RNG module - uniform random piece generation
//!
//! Every spawn draws a shape and a color independently and uniformly. The random
//! source is injected so games are reproducible from a seed.
//!
//! Also provides a simple LCG for deterministic testing.

use crate::types::{Rgb, ShapeKind, PALETTE};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Random value in range [0, max)
    fn next_range(&mut self, max: u32) -> u32;

    fn pick_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.next_range(ShapeKind::ALL.len() as u32) as usize]
    }

    fn pick_color(&mut self) -> Rgb {
        PALETTE[self.next_range(PALETTE.len() as u32) as usize]
    }
}

/// 32-bit linear congruential generator (Numerical Recipes constants).
///
/// Not suitable for anything but games; its only job is reproducible piece order.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seeds 0 and 1 share a stream.
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG have short periods; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Handy for tests that need a specific shape/color order.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_range(&mut self, max: u32) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % max.max(1)
    }
}
