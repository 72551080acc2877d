//! PCG64 — 64-bit LCG state with a xorshift-rotate output permutation.
//!
//! The state advances as `state * 6364136223846793005 + inc (mod 2^64)`
//! where `inc` is always odd. The output of each step is a permutation of
//! the *previous* state: fold the high bits down with a xor-shift, rotate by
//! the top 6 bits, then finish with a multiply and a xor-shift. The raw LCG
//! low bits have tiny periods; the permutation is what hides them.

use super::BitGenerator;

/// LCG multiplier.
pub const MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// Multiplier of the final output scramble.
pub const OUTPUT_MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

pub const DEFAULT_SEED: u64 = 1;
pub const DEFAULT_INCREMENT: u64 = 1;

/// Permuted congruential generator with 64-bit state and output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg64 {
    state: u64,
    inc: u64,
}

impl Pcg64 {
    /// Seed with `seed` on the stream selected by `increment`.
    ///
    /// The actual increment is `(increment << 1) | 1`. Seeding steps once
    /// from a zero state, adds the seed, and steps again.
    pub fn new(seed: u64, increment: u64) -> Self {
        let mut pcg = Self {
            state: 0,
            inc: (increment << 1) | 1,
        };
        pcg.step();
        pcg.state = pcg.state.wrapping_add(seed);
        pcg.step();
        pcg
    }

    /// Seed on the default stream.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, DEFAULT_INCREMENT)
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(self.inc);
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    /// The odd increment actually used by the LCG.
    pub fn increment(&self) -> u64 {
        self.inc
    }

    pub(crate) fn set_parts(&mut self, state: u64, inc: u64) {
        self.state = state;
        self.inc = inc;
    }
}

impl Default for Pcg64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_INCREMENT)
    }
}

impl BitGenerator for Pcg64 {
    fn next(&mut self) -> u64 {
        let old = self.state;
        self.step();

        let x = (old >> 18) ^ old;
        let rot = (old >> 58) as u32;
        let rotated = x.rotate_right(rot);
        rotated.wrapping_mul(OUTPUT_MULTIPLIER) ^ (rotated >> 29)
    }

    fn width(&self) -> u32 {
        64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_is_forced_odd() {
        assert_eq!(Pcg64::new(1, 0).increment(), 1);
        assert_eq!(Pcg64::new(1, 1).increment(), 3);
        assert_eq!(Pcg64::new(1, 2).increment(), 5);
    }

    #[test]
    fn seeding_steps_before_and_after_adding_seed() {
        let g = Pcg64::new(42, 1);
        let inc = 3u64;
        let s = inc.wrapping_add(42);
        let s = s.wrapping_mul(MULTIPLIER).wrapping_add(inc);
        assert_eq!(g.state(), s);
    }

    #[test]
    fn reference_raw_sequence_seed_42() {
        let mut g = Pcg64::new(42, 1);
        assert_eq!(g.next(), 0xCC17_98E1_A71E_6FCD);
        assert_eq!(g.next(), 0xD5B2_A8A0_0F62_44CE);
        assert_eq!(g.next(), 0xF241_B8F3_B82E_3E44);
    }

    #[test]
    fn reference_next_int_seed_42() {
        let mut g = Pcg64::new(42, 1);
        let v: Vec<u64> = (0..3).map(|_| g.next_int(100).unwrap()).collect();
        assert_eq!(v, vec![57, 46, 4]);
    }

    #[test]
    fn streams_differ_by_increment() {
        let mut a = Pcg64::new(42, 1);
        let mut b = Pcg64::new(42, 2);
        assert_ne!(a.next(), b.next());
    }

    #[test]
    fn next_float_seed_42() {
        let mut g = Pcg64::new(42, 1);
        let f = g.next_float();
        let expected = (0xCC17_98E1_A71E_6FCDu64 & ((1 << 53) - 1)) as f64 / (1u64 << 53) as f64;
        assert_eq!(f, expected);
    }
}
