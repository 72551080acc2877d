//! Bit generators.
//!
//! Every generator is a deterministic state machine implementing
//! [`BitGenerator`]: `next()` advances the state once and returns a raw value
//! of the generator's native width; `next_int` and `next_float` derive
//! uniform values through [`crate::uniform`].
//!
//! | Generator | Width | State | Default seed |
//! |---|---|---|---|
//! | [`Xorshift64`] | 64 | one `u64`, never 0 | 1 |
//! | [`SplitMix64`] | 64 | one `u64` counter | 1 |
//! | [`Pcg64`] | 64 | LCG state + odd increment | seed 1, inc 1 |
//! | [`Mt19937`] | 32 | 624 words + index | 5489 |
//! | [`Logistic`] | 53 | `x ∈ (0,1)`, `r` | x 0.5, r 3.99 |
//! | [`Tent`] | 53 | `x ∈ (0,1)`, `mu` | x 0.5, mu 1.95 |
//! | [`Mixer`] | max of children | two owned generators | PCG64 ⊕ Xorshift64 |
//!
//! [`Generator`] is the closed union of all of them. Code that is generic
//! over the kind (the facade, seeding, snapshots) works with `Generator`, so
//! adding a variant is a compile error everywhere a kind must be handled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conditioning::splitmix_mix;
use crate::error::{Result, RngError};
use crate::uniform::{bounded, unit_float};

mod logistic;
mod mixer;
mod mt19937;
mod pcg;
mod splitmix;
mod tent;
mod xorshift;

pub use logistic::Logistic;
pub use mixer::Mixer;
pub use mt19937::Mt19937;
pub use pcg::Pcg64;
pub use splitmix::SplitMix64;
pub use tent::Tent;
pub use xorshift::Xorshift64;

pub(crate) use logistic::validate as validate_logistic;
pub(crate) use tent::validate as validate_tent;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A deterministic stream of fixed-width unsigned integers.
///
/// Implementors provide [`next`](Self::next) and [`width`](Self::width); the
/// derived operations have correct default implementations in terms of
/// those two and only need overriding when a generator defines its own
/// combination policy (the chaotic maps and [`Mixer`]).
pub trait BitGenerator {
    /// Advance the state once and return the raw output. Only the low
    /// [`width`](Self::width) bits may be set.
    fn next(&mut self) -> u64;

    /// Native output width in bits (1..=64).
    fn width(&self) -> u32;

    /// Unbiased integer in `[0, max)`.
    ///
    /// Fails with [`RngError::InvalidArgument`] when `max == 0`, without
    /// advancing the state.
    fn next_int(&mut self, max: u64) -> Result<u64> {
        check_max(max)?;
        let width = self.width();
        Ok(bounded(max, width, || self.next()))
    }

    /// Double in `[0, 1)` with 53 random mantissa bits.
    fn next_float(&mut self) -> f64 {
        let width = self.width();
        unit_float(width, || self.next())
    }
}

impl<G: BitGenerator + ?Sized> BitGenerator for &mut G {
    fn next(&mut self) -> u64 {
        (**self).next()
    }

    fn width(&self) -> u32 {
        (**self).width()
    }

    fn next_int(&mut self, max: u64) -> Result<u64> {
        (**self).next_int(max)
    }

    fn next_float(&mut self) -> f64 {
        (**self).next_float()
    }
}

impl<G: BitGenerator + ?Sized> BitGenerator for Box<G> {
    fn next(&mut self) -> u64 {
        (**self).next()
    }

    fn width(&self) -> u32 {
        (**self).width()
    }

    fn next_int(&mut self, max: u64) -> Result<u64> {
        (**self).next_int(max)
    }

    fn next_float(&mut self) -> f64 {
        (**self).next_float()
    }
}

/// Reject `max == 0` for `next_int`.
pub(crate) fn check_max(max: u64) -> Result<()> {
    if max == 0 {
        return Err(RngError::invalid("max must be positive"));
    }
    Ok(())
}

/// Map a 64-bit seed into the open interval `(0, 1)`.
///
/// The seed is run through the SplitMix64 mix first so every bit of it
/// reaches the result; the top 52 bits of the mix plus one half are then
/// scaled by `2^-52`, which is exact and never touches either endpoint.
pub(crate) fn unit_from_seed(seed: u64) -> f64 {
    ((splitmix_mix(seed) >> 12) as f64 + 0.5) * (1.0 / (1u64 << 52) as f64)
}

// ---------------------------------------------------------------------------
// Kind selector
// ---------------------------------------------------------------------------

/// Selector for the generator algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Xorshift64,
    SplitMix64,
    Pcg64,
    Mt19937,
    Logistic,
    Tent,
    Mixer,
}

impl GeneratorKind {
    /// Every kind, in declaration order.
    pub const ALL: [GeneratorKind; 7] = [
        Self::Xorshift64,
        Self::SplitMix64,
        Self::Pcg64,
        Self::Mt19937,
        Self::Logistic,
        Self::Tent,
        Self::Mixer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xorshift64 => "xorshift64",
            Self::SplitMix64 => "splitmix64",
            Self::Pcg64 => "pcg64",
            Self::Mt19937 => "mt19937",
            Self::Logistic => "logistic",
            Self::Tent => "tent",
            Self::Mixer => "mixer",
        }
    }

    /// Whether the kind passes common statistical batteries. The chaotic
    /// maps do not: their outputs are strongly correlated step to step.
    pub fn is_statistically_strong(&self) -> bool {
        !matches!(self, Self::Logistic | Self::Tent)
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| RngError::invalid(format!("unknown generator kind '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Closed union
// ---------------------------------------------------------------------------

/// Any of the built-in generators, owned by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    Xorshift64(Xorshift64),
    SplitMix64(SplitMix64),
    Pcg64(Pcg64),
    Mt19937(Mt19937),
    Logistic(Logistic),
    Tent(Tent),
    Mixer(Mixer),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            Generator::Xorshift64($g) => $body,
            Generator::SplitMix64($g) => $body,
            Generator::Pcg64($g) => $body,
            Generator::Mt19937($g) => $body,
            Generator::Logistic($g) => $body,
            Generator::Tent($g) => $body,
            Generator::Mixer($g) => $body,
        }
    };
}

impl Generator {
    /// Construct `kind` from a single 64-bit seed.
    ///
    /// PCG64 uses the default increment, MT19937 the low 32 bits of the seed,
    /// and the chaotic maps map the seed into `(0, 1)` with their default
    /// control parameter.
    pub fn from_seed(kind: GeneratorKind, seed: u64) -> Self {
        match kind {
            GeneratorKind::Xorshift64 => Xorshift64::new(seed).into(),
            GeneratorKind::SplitMix64 => SplitMix64::new(seed).into(),
            GeneratorKind::Pcg64 => Pcg64::with_seed(seed).into(),
            GeneratorKind::Mt19937 => Mt19937::from_seed(seed).into(),
            GeneratorKind::Logistic => Logistic::from_seed(seed).into(),
            GeneratorKind::Tent => Tent::from_seed(seed).into(),
            GeneratorKind::Mixer => Mixer::from_seed(seed).into(),
        }
    }

    /// Construct `kind` with its documented default seed.
    pub fn with_default_seed(kind: GeneratorKind) -> Self {
        match kind {
            GeneratorKind::Xorshift64 => Xorshift64::default().into(),
            GeneratorKind::SplitMix64 => SplitMix64::default().into(),
            GeneratorKind::Pcg64 => Pcg64::default().into(),
            GeneratorKind::Mt19937 => Mt19937::default().into(),
            GeneratorKind::Logistic => Logistic::default().into(),
            GeneratorKind::Tent => Tent::default().into(),
            GeneratorKind::Mixer => Mixer::default().into(),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Xorshift64(_) => GeneratorKind::Xorshift64,
            Self::SplitMix64(_) => GeneratorKind::SplitMix64,
            Self::Pcg64(_) => GeneratorKind::Pcg64,
            Self::Mt19937(_) => GeneratorKind::Mt19937,
            Self::Logistic(_) => GeneratorKind::Logistic,
            Self::Tent(_) => GeneratorKind::Tent,
            Self::Mixer(_) => GeneratorKind::Mixer,
        }
    }
}

impl BitGenerator for Generator {
    fn next(&mut self) -> u64 {
        dispatch!(self, g => g.next())
    }

    fn width(&self) -> u32 {
        dispatch!(self, g => g.width())
    }

    fn next_int(&mut self, max: u64) -> Result<u64> {
        dispatch!(self, g => g.next_int(max))
    }

    fn next_float(&mut self) -> f64 {
        dispatch!(self, g => g.next_float())
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Generator {
                fn from(g: $ty) -> Self {
                    Generator::$ty(g)
                }
            }
        )*
    };
}

impl_from_variant!(Xorshift64, SplitMix64, Pcg64, Mt19937, Logistic, Tent, Mixer);

// ---------------------------------------------------------------------------
// rand interop
// ---------------------------------------------------------------------------

/// 32 uniformly random bits from any generator.
pub(crate) fn draw_u32<G: BitGenerator + ?Sized>(g: &mut G) -> u32 {
    let width = g.width();
    if width >= 32 {
        (g.next() >> (width - 32)) as u32
    } else {
        g.next_int(1 << 32).map(|v| v as u32).unwrap_or_default()
    }
}

/// 64 uniformly random bits from any generator.
pub(crate) fn draw_u64<G: BitGenerator + ?Sized>(g: &mut G) -> u64 {
    if g.width() == 64 {
        g.next()
    } else {
        let hi = u64::from(draw_u32(g));
        let lo = u64::from(draw_u32(g));
        (hi << 32) | lo
    }
}

pub(crate) fn fill_bytes_from<G: BitGenerator + ?Sized>(g: &mut G, dst: &mut [u8]) {
    for chunk in dst.chunks_mut(8) {
        let bytes = draw_u64(g).to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}

impl rand::RngCore for Generator {
    fn next_u32(&mut self) -> u32 {
        draw_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        draw_u64(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        fill_bytes_from(self, dst)
    }
}
