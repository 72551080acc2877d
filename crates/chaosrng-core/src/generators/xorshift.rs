//! Xorshift64 — Marsaglia's 13/7/17 shift-xor generator.
//!
//! Period `2^64 - 1`. Zero is a fixed point of the transition, so a zero
//! seed is replaced by 1 at construction and a zero state can never be
//! restored.

use crate::conditioning::nonzero;

use super::BitGenerator;

pub const DEFAULT_SEED: u64 = 1;

/// 64-bit xorshift generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Seed 0 behaves exactly like seed 1.
    pub fn new(seed: u64) -> Self {
        Self {
            state: nonzero(seed),
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: u64) {
        self.state = state;
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl BitGenerator for Xorshift64 {
    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn width(&self) -> u32 {
        64
    }
}
