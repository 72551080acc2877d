//! # chaosrng-core
//!
//! **Reproducible random streams you can save, restore and reseed.**
//!
//! `chaosrng-core` provides a family of deterministic bit generators behind
//! one trait, an unbiased uniform layer on top of them, a small ergonomic
//! facade, and entropy seeding for when reproducibility is not wanted.
//!
//! ## Quick Start
//!
//! ```
//! use chaosrng_core::{GeneratorKind, Rng, Stateful};
//!
//! let mut rng = Rng::new(GeneratorKind::Pcg64, 42);
//! let roll = rng.int(1, 6).unwrap();
//! assert!((1..=6).contains(&roll));
//!
//! // Save, draw, restore, draw again: same values.
//! let snap = rng.save_state().unwrap();
//! let a = rng.floats(4);
//! rng.restore_state(&snap).unwrap();
//! assert_eq!(rng.floats(4), a);
//! ```
//!
//! ## Architecture
//!
//! Entropy sources → mixer → seed → BitGenerator → uniform layer → Rng
//!
//! - **Generators**: Xorshift64, SplitMix64, PCG64, MT19937, the logistic and
//!   tent chaotic maps, and a two-generator Mixer.
//! - **Uniform layer**: rejection sampling for `[0, max)` integers and exactly
//!   53-bit doubles in `[0, 1)`, whatever the generator's native width.
//! - **Seeding**: [`SeedSequence`] expands one seed into many; [`combined`]
//!   folds timer, memory and OS readings into a never-zero seed.
//! - **State**: every built-in generator snapshots to a serializable
//!   [`StateSnapshot`] and restores from it.
//!
//! None of the generators are cryptographically secure.

pub mod conditioning;
pub mod entropy;
pub mod error;
pub mod generators;
pub mod rng;
pub mod seed;
pub mod sequence;
pub mod source;
pub mod sources;
pub mod state;
pub mod uniform;

pub use entropy::{EntropyConfig, EntropyMixer, EntropyReadings, combined};
pub use error::{Result, RngError};
pub use generators::{
    BitGenerator, Generator, GeneratorKind, Logistic, Mixer, Mt19937, Pcg64, SplitMix64, Tent,
    Xorshift64,
};
pub use rng::{Rng, deterministic};
pub use seed::{SeedEntropy, SeedSequence, seed_multiple};
pub use sequence::{pick, sample, shuffle};
pub use source::{EntropySource, SourceCategory, SourceInfo};
pub use state::{StateSnapshot, Stateful, clone_generator, restore_state, save_state};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
