//! MT19937 — 32-bit Mersenne Twister (Matsumoto & Nishimura, 1998).
//!
//! Period `2^19937 - 1`. The state is 624 32-bit words plus a read index.
//! When the index runs off the end, the whole array is regenerated by the
//! twist and each word is tempered on the way out. Output matches the
//! reference `genrand_int32` / `genrand_res53` exactly for the same seed.

use super::BitGenerator;

/// Number of state words.
pub const N: usize = 624;
/// Twist offset.
pub const M: usize = 397;

const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;
const INIT_MULTIPLIER: u32 = 1_812_433_253;

pub const DEFAULT_SEED: u32 = 5489;

/// 32-bit Mersenne Twister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mt19937 {
    words: Box<[u32; N]>,
    index: usize,
}

impl Mt19937 {
    pub fn new(seed: u32) -> Self {
        let mut words = Box::new([0u32; N]);
        words[0] = seed;
        for i in 1..N {
            let prev = words[i - 1];
            words[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { words, index: N }
    }

    /// Seed from the low 32 bits of a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(seed as u32)
    }

    fn twist(&mut self) {
        let mt = &mut self.words;
        for i in 0..N {
            let y = (mt[i] & UPPER_MASK) | (mt[(i + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 1 { MATRIX_A } else { 0 };
            mt[i] = mt[(i + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }

    #[inline]
    fn temper(mut y: u32) -> u32 {
        y ^= y >> 11;
        y ^= (y << 7) & 0x9D2C_5680;
        y ^= (y << 15) & 0xEFC6_0000;
        y ^ (y >> 18)
    }

    /// Next tempered 32-bit word.
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let y = self.words[self.index];
        self.index += 1;
        Self::temper(y)
    }

    pub fn words(&self) -> &[u32; N] {
        &self.words
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_parts(&mut self, words: &[u32], index: usize) {
        self.words.copy_from_slice(words);
        self.index = index;
    }
}

impl Default for Mt19937 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl BitGenerator for Mt19937 {
    fn next(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn width(&self) -> u32 {
        32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sequence_seed_5489() {
        let mut mt = Mt19937::default();
        assert_eq!(mt.next(), 3_499_211_612);
        assert_eq!(mt.next(), 581_869_302);
        assert_eq!(mt.next(), 3_890_346_734);
    }

    #[test]
    fn reference_res53_seed_5489() {
        let mut mt = Mt19937::default();
        assert_eq!(mt.next_float(), 0.8147236863931789);
    }

    #[test]
    fn init_fills_words_from_seed() {
        let mt = Mt19937::new(5489);
        assert_eq!(mt.words()[0], 5489);
        assert_eq!(mt.index(), N);
        let prev = mt.words()[0];
        let expected = INIT_MULTIPLIER
            .wrapping_mul(prev ^ (prev >> 30))
            .wrapping_add(1);
        assert_eq!(mt.words()[1], expected);
    }

    #[test]
    fn twist_happens_every_624_draws() {
        let mut mt = Mt19937::new(1);
        mt.next();
        assert_eq!(mt.index(), 1);
        for _ in 1..N {
            mt.next();
        }
        assert_eq!(mt.index(), N);
        mt.next();
        assert_eq!(mt.index(), 1);
    }

    #[test]
    fn from_seed_uses_low_32_bits() {
        let mut a = Mt19937::from_seed(0x1_0000_0007);
        let mut b = Mt19937::new(7);
        for _ in 0..10 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn next_int_uses_full_32_bit_draws() {
        let mut mt = Mt19937::default();
        for _ in 0..1000 {
            assert!(mt.next_int(100_000).unwrap() < 100_000);
        }
        // Bounds wider than 32 bits combine two draws.
        let big = 1u64 << 40;
        assert!(mt.next_int(big).unwrap() < big);
    }
}
