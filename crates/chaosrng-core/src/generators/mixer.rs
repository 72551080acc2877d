//! Mixer — combines two independently seeded generators.
//!
//! Each operation draws once from both children and combines the results,
//! with a different policy per operation:
//!
//! - `next`: bitwise XOR of the raw outputs (narrower outputs are
//!   zero-extended to 64 bits),
//! - `next_int`: `(a + b) mod max` of the children's bounded draws,
//! - `next_float`: the mean of the children's floats.
//!
//! The policies are intentionally kept distinct; callers may depend on any
//! of them. Note the mean of two uniforms is triangular, not uniform.
//! Children are owned [`Generator`]s, so mixers nest to any depth.

use crate::conditioning::GOLDEN_GAMMA;
use crate::error::Result;

use super::{BitGenerator, Generator, Pcg64, SplitMix64, Xorshift64, check_max};

/// Two-generator combinator.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer {
    first: Box<Generator>,
    second: Box<Generator>,
}

impl Mixer {
    pub fn new(first: impl Into<Generator>, second: impl Into<Generator>) -> Self {
        Self {
            first: Box::new(first.into()),
            second: Box::new(second.into()),
        }
    }

    /// PCG64 and Xorshift64 children seeded from two consecutive SplitMix64
    /// outputs of `seed`.
    pub fn from_seed(seed: u64) -> Self {
        let mut expander = SplitMix64::new(seed);
        let a = expander.next();
        let b = expander.next();
        Self::new(Pcg64::with_seed(a), Xorshift64::new(b))
    }

    pub fn first(&self) -> &Generator {
        &self.first
    }

    pub fn second(&self) -> &Generator {
        &self.second
    }

    pub(crate) fn children_mut(&mut self) -> (&mut Generator, &mut Generator) {
        (&mut *self.first, &mut *self.second)
    }

    pub fn into_parts(self) -> (Generator, Generator) {
        (*self.first, *self.second)
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::from_seed(GOLDEN_GAMMA)
    }
}

impl BitGenerator for Mixer {
    fn next(&mut self) -> u64 {
        self.first.next() ^ self.second.next()
    }

    fn width(&self) -> u32 {
        self.first.width().max(self.second.width())
    }

    fn next_int(&mut self, max: u64) -> Result<u64> {
        check_max(max)?;
        let a = self.first.next_int(max)?;
        let b = self.second.next_int(max)?;
        Ok(((u128::from(a) + u128::from(b)) % u128::from(max)) as u64)
    }

    fn next_float(&mut self) -> f64 {
        let f1 = self.first.next_float();
        let f2 = self.second.next_float();
        (f1 + f2) / 2.0
    }
}
