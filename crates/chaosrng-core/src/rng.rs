//! The RNG facade.
//!
//! [`Rng`] wraps one bit generator and derives everything else from the
//! generator's `next_int` and `next_float`. All arguments are validated before
//! the first draw, so a call that returns an error leaves the stream exactly
//! where it was.
//!
//! ```
//! use chaosrng_core::{GeneratorKind, Rng};
//!
//! let mut rng = Rng::new(GeneratorKind::Pcg64, 42);
//! let die = rng.int(1, 6).unwrap();
//! assert!((1..=6).contains(&die));
//! let coin = rng.bool(0.5).unwrap();
//! let pick = rng.choice(&["red", "green", "blue"]).unwrap();
//! # let _ = (coin, pick);
//! ```

use crate::entropy::{self, EntropyMixer};
use crate::error::{Result, RngError};
use crate::generators::{
    BitGenerator, Generator, GeneratorKind, Pcg64, draw_u32, draw_u64, fill_bytes_from,
};
use crate::sequence;
use crate::state::{StateSnapshot, Stateful};

const TWO_POW_32: u64 = 1 << 32;

/// Ergonomic front end over a [`BitGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rng<G: BitGenerator = Generator> {
    generator: G,
}

impl Rng<Generator> {
    /// `kind` seeded with `seed`.
    pub fn new(kind: GeneratorKind, seed: u64) -> Self {
        Self::from_generator(Generator::from_seed(kind, seed))
    }

    /// PCG64 seeded from ambient entropy.
    pub fn from_entropy() -> Self {
        Self::from_kind_entropy(GeneratorKind::Pcg64)
    }

    /// `kind` seeded from ambient entropy.
    pub fn from_kind_entropy(kind: GeneratorKind) -> Self {
        let seed = entropy::combined();
        log::debug!("seeding {kind} from ambient entropy");
        Self::new(kind, seed)
    }

    /// `kind` seeded from a caller-held mixer. Within the mixer's cache
    /// window, repeated calls reuse one OS-randomness read.
    pub fn from_mixer(kind: GeneratorKind, mixer: &mut EntropyMixer) -> Self {
        let seed = mixer.combined();
        log::debug!("seeding {kind} from entropy mixer");
        Self::new(kind, seed)
    }

    pub fn with_default_seed(kind: GeneratorKind) -> Self {
        Self::from_generator(Generator::with_default_seed(kind))
    }

    pub fn kind(&self) -> GeneratorKind {
        self.generator.kind()
    }
}

impl<G: BitGenerator> Rng<G> {
    pub fn from_generator(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    pub fn into_inner(self) -> G {
        self.generator
    }

    /// Raw output of the wrapped generator.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        self.generator.next()
    }

    pub fn next_int(&mut self, max: u64) -> Result<u64> {
        self.generator.next_int(max)
    }

    pub fn next_float(&mut self) -> f64 {
        self.generator.next_float()
    }

    /// Integer in `[min, max]`, both ends inclusive. Swapped bounds are
    /// accepted and reordered.
    pub fn int(&mut self, min: i64, max: i64) -> Result<i64> {
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        let span = hi.abs_diff(lo);
        let offset = if span == u64::MAX {
            // 2^64 values do not fit in a u64 bound.
            let high = self.generator.next_int(TWO_POW_32)?;
            let low = self.generator.next_int(TWO_POW_32)?;
            (high << 32) | low
        } else {
            self.generator.next_int(span + 1)?
        };
        Ok(lo.wrapping_add_unsigned(offset))
    }

    /// `true` with probability `p`.
    pub fn bool(&mut self, p: f64) -> Result<bool> {
        check_probability(p)?;
        Ok(self.generator.next_float() < p)
    }

    /// Uniform pick from `min, min + step, ...` up to and including `max`
    /// when it lies on the grid.
    pub fn range(&mut self, min: i64, max: i64, step: i64) -> Result<i64> {
        if step <= 0 {
            return Err(RngError::invalid(format!("step must be positive, got {step}")));
        }
        if min > max {
            return Err(RngError::invalid(format!(
                "range min must not exceed max, got {min} > {max}"
            )));
        }
        let step = step.unsigned_abs();
        let last = max.abs_diff(min) / step;
        if last == u64::MAX {
            return self.int(min, max);
        }
        let index = self.generator.next_int(last + 1)?;
        Ok(min.wrapping_add_unsigned(index * step))
    }

    /// Uniformly chosen element.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        sequence::pick(items, &mut self.generator)
    }

    /// Shuffle `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) -> Result<()> {
        sequence::shuffle(items, &mut self.generator)
    }

    pub fn floats(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.generator.next_float()).collect()
    }

    pub fn ints(&mut self, n: usize, max: u64) -> Result<Vec<u64>> {
        if max == 0 {
            return Err(RngError::invalid("max must be positive"));
        }
        (0..n).map(|_| self.generator.next_int(max)).collect()
    }

    pub fn bools(&mut self, n: usize, p: f64) -> Result<Vec<bool>> {
        check_probability(p)?;
        Ok((0..n).map(|_| self.generator.next_float() < p).collect())
    }

    /// `n` values from `f`, called in order with the facade and the index.
    pub fn batch<T, F>(&mut self, n: usize, mut f: F) -> Vec<T>
    where
        F: FnMut(&mut Self, usize) -> T,
    {
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(f(self, i));
        }
        out
    }
}

fn check_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(RngError::invalid(format!(
            "probability must be in [0, 1], got {p}"
        )));
    }
    Ok(())
}

/// A PCG64 facade with a fixed seed, for tests and reproducible runs.
pub fn deterministic(seed: u64) -> Rng {
    Rng::from_generator(Generator::from(Pcg64::with_seed(seed)))
}

impl<G: BitGenerator> BitGenerator for Rng<G> {
    fn next(&mut self) -> u64 {
        self.generator.next()
    }

    fn width(&self) -> u32 {
        self.generator.width()
    }

    fn next_int(&mut self, max: u64) -> Result<u64> {
        self.generator.next_int(max)
    }

    fn next_float(&mut self) -> f64 {
        self.generator.next_float()
    }
}

impl<G: BitGenerator + Stateful> Stateful for Rng<G> {
    fn save_state(&self) -> Result<StateSnapshot> {
        self.generator.save_state()
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        self.generator.restore_state(snapshot)
    }
}

impl<G: BitGenerator> rand::RngCore for Rng<G> {
    fn next_u32(&mut self) -> u32 {
        draw_u32(&mut self.generator)
    }

    fn next_u64(&mut self) -> u64 {
        draw_u64(&mut self.generator)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        fill_bytes_from(&mut self.generator, dst)
    }
}

impl From<Generator> for Rng {
    fn from(generator: Generator) -> Self {
        Self::from_generator(generator)
    }
}
