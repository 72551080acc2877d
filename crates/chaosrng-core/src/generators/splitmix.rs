//! SplitMix64 — Weyl-sequence counter with an avalanche output function.
//!
//! The state is advanced by the golden-ratio gamma `0x9E3779B97F4A7C15`
//! and the new state is mixed by [`splitmix_mix`]. Every seed, including
//! zero, is usable. The seed sequence uses the same mix to decorrelate
//! derived seeds.

use crate::conditioning::{GOLDEN_GAMMA, splitmix_mix};

use super::BitGenerator;

pub const DEFAULT_SEED: u64 = 1;

/// SplitMix64 generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: u64) {
        self.state = state;
    }
}

impl Default for SplitMix64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl BitGenerator for SplitMix64 {
    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        splitmix_mix(self.state)
    }

    fn width(&self) -> u32 {
        64
    }
}
