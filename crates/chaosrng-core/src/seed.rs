//! Seed sequences: one base seed expanded into many derived seeds.
//!
//! A [`SeedSequence`] owns a base seed and a counter. Each [`next`] call
//! returns `seed ^ counter` and bumps the counter, so the derived values are
//! distinct and depend only on the base seed and how many were taken before.
//! [`derive`] additionally runs the value through the SplitMix64 finalizer,
//! which is what generator construction uses: raw `seed ^ counter` values
//! differ only in their low bits, and that would seed sibling generators with
//! nearly identical states.
//!
//! [`next`]: SeedSequence::next
//! [`derive`]: SeedSequence::derive

use crate::conditioning::{djb2_xor, splitmix_mix};
use crate::entropy::{self, EntropyMixer};
use crate::error::{Result, RngError};
use crate::generators::{Generator, GeneratorKind};

/// Where a [`SeedSequence`] takes its base seed from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeedEntropy {
    /// Ambient entropy from [`entropy::combined`].
    #[default]
    Ambient,
    /// A label hashed with the DJB2-xor string hash. Must not be empty.
    Text(String),
    /// A numeric seed used as is.
    Value(u64),
}

impl From<u64> for SeedEntropy {
    fn from(v: u64) -> Self {
        Self::Value(v)
    }
}

impl From<&str> for SeedEntropy {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for SeedEntropy {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Option<u64>> for SeedEntropy {
    fn from(v: Option<u64>) -> Self {
        v.map_or(Self::Ambient, Self::Value)
    }
}

/// Deterministic expansion of one base seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSequence {
    seed: u64,
    counter: u64,
}

impl SeedSequence {
    pub fn new(entropy: impl Into<SeedEntropy>) -> Result<Self> {
        let seed = match entropy.into() {
            SeedEntropy::Ambient => {
                let seed = entropy::combined();
                log::debug!("seed sequence seeded from ambient entropy");
                seed
            }
            SeedEntropy::Text(text) => {
                if text.is_empty() {
                    return Err(RngError::invalid("seed text must not be empty"));
                }
                djb2_xor(&text)
            }
            SeedEntropy::Value(v) => v,
        };
        Ok(Self { seed, counter: 0 })
    }

    /// Base seed from a caller-held mixer, so repeated ambient seeding within
    /// the mixer's cache window shares one OS read.
    pub fn from_mixer(mixer: &mut EntropyMixer) -> Self {
        let seed = mixer.combined();
        log::debug!("seed sequence seeded from entropy mixer");
        Self { seed, counter: 0 }
    }

    /// `seed ^ counter`, then advance the counter.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let value = self.seed ^ self.counter;
        self.counter = self.counter.wrapping_add(1);
        value
    }

    /// The next `n` values of [`next`](Self::next), in order.
    pub fn spawn(&mut self, n: usize) -> Result<Vec<u64>> {
        if n == 0 {
            return Err(RngError::invalid("spawn count must be positive"));
        }
        Ok((0..n).map(|_| self.next()).collect())
    }

    /// The next value, finalized with the SplitMix64 mix.
    pub fn derive(&mut self) -> u64 {
        splitmix_mix(self.next())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values taken so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

/// One generator per entry of `kinds`, all seeded from a single sequence.
///
/// The same `kinds` and numeric or text entropy always produce the same
/// generators.
pub fn seed_multiple(
    kinds: &[GeneratorKind],
    entropy: impl Into<SeedEntropy>,
) -> Result<Vec<Generator>> {
    if kinds.is_empty() {
        return Err(RngError::invalid("seed_multiple needs at least one kind"));
    }
    let mut seq = SeedSequence::new(entropy)?;
    Ok(kinds
        .iter()
        .map(|&kind| Generator::from_seed(kind, seq.derive()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::BitGenerator;

    #[test]
    fn next_xors_counter() {
        let mut seq = SeedSequence::new(42u64).unwrap();
        assert_eq!(seq.next(), 42);
        assert_eq!(seq.next(), 43);
        assert_eq!(seq.next(), 40);
        assert_eq!(seq.counter(), 3);
    }

    #[test]
    fn spawn_is_repeatable() {
        let a = SeedSequence::new(42u64).unwrap().spawn(3).unwrap();
        let b = SeedSequence::new(42u64).unwrap().spawn(3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, vec![42, 43, 40]);
        let c = SeedSequence::new(43u64).unwrap().spawn(3).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn spawn_continues_the_counter() {
        let mut seq = SeedSequence::new(7u64).unwrap();
        let first = seq.spawn(2).unwrap();
        let second = seq.spawn(2).unwrap();
        let all = SeedSequence::new(7u64).unwrap().spawn(4).unwrap();
        assert_eq!([first, second].concat(), all);
    }

    #[test]
    fn spawn_zero_is_rejected() {
        let mut seq = SeedSequence::new(1u64).unwrap();
        assert!(matches!(seq.spawn(0), Err(RngError::InvalidArgument(_))));
        assert_eq!(seq.counter(), 0);
    }

    #[test]
    fn text_entropy_uses_djb2_xor() {
        let seq = SeedSequence::new("a").unwrap();
        assert_eq!(seq.seed(), 177_604);
        assert!(SeedSequence::new("").is_err());
    }

    #[test]
    fn option_entropy() {
        assert_eq!(SeedEntropy::from(Some(5)), SeedEntropy::Value(5));
        assert_eq!(SeedEntropy::from(None), SeedEntropy::Ambient);
    }

    #[test]
    fn ambient_entropy_is_nonzero() {
        let seq = SeedSequence::new(SeedEntropy::Ambient).unwrap();
        assert_ne!(seq.seed(), 0);
    }

    #[test]
    fn ambient_seeds_from_held_mixer_share_os_read() {
        let config = entropy::EntropyConfig {
            cache_ttl_ms: 60_000,
            ..Default::default()
        };
        let mut mixer = EntropyMixer::new(config).unwrap();
        let a = SeedSequence::from_mixer(&mut mixer);
        let b = SeedSequence::from_mixer(&mut mixer);
        assert_ne!(a.seed(), 0);
        assert_ne!(b.seed(), 0);
        assert_eq!(mixer.os_source().cache().misses(), 1);
        assert_eq!(mixer.os_source().cache().hits(), 1);
    }

    #[test]
    fn seed_multiple_builds_requested_kinds() {
        let kinds = [GeneratorKind::Pcg64, GeneratorKind::Mt19937, GeneratorKind::Pcg64];
        let gens = seed_multiple(&kinds, 99u64).unwrap();
        let got: Vec<_> = gens.iter().map(Generator::kind).collect();
        assert_eq!(got, kinds);
        // Same kind, different derived seeds.
        let mut a = gens[0].clone();
        let mut b = gens[2].clone();
        assert_ne!(a.next(), b.next());
    }

    #[test]
    fn seed_multiple_is_deterministic() {
        let kinds = GeneratorKind::ALL;
        let a = seed_multiple(&kinds, "experiment-1").unwrap();
        let b = seed_multiple(&kinds, "experiment-1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seed_multiple_rejects_empty_kinds() {
        assert!(matches!(
            seed_multiple(&[], 1u64),
            Err(RngError::InvalidArgument(_))
        ));
    }
}
