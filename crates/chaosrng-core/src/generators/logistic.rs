//! Logistic map `x ← r·x·(1−x)` used as a bit generator.
//!
//! **Limitation:** this is a chaotic dynamical system, not a statistically
//! strong generator. Consecutive outputs are strongly correlated, the output
//! density is not uniform (it piles up near 0 and 1 for `r ≈ 4`), and some
//! starting points fall onto short cycles or fixed points (`x = 1 − 1/r`).
//! Use it to add structured noise or through a [`Mixer`](super::Mixer), not
//! as a primary source of uniform values.
//!
//! The state is kept inside `[ε, 1−ε]` (ε = `f64::EPSILON`) after every step,
//! so the absorbing point 0 and the out-of-range value 1 are unreachable.

use crate::error::{Result, RngError};

use super::{BitGenerator, unit_from_seed};

pub const DEFAULT_X: f64 = 0.5;
pub const DEFAULT_R: f64 = 3.99;

const LOW: f64 = f64::EPSILON;
const HIGH: f64 = 1.0 - f64::EPSILON;

/// `2^53` as a float, scales the state into a 53-bit raw output.
const RAW_SCALE: f64 = (1u64 << 53) as f64;

/// Logistic-map generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Logistic {
    x: f64,
    r: f64,
}

impl Logistic {
    /// `x` must lie strictly inside `(0, 1)` and `r` in `(0, 4]`.
    pub fn new(x: f64, r: f64) -> Result<Self> {
        validate(x, r)?;
        Ok(Self { x, r })
    }

    /// Map a 64-bit seed into `(0, 1)` with the default `r`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            x: unit_from_seed(seed),
            r: DEFAULT_R,
        }
    }

    fn step(&mut self) -> f64 {
        self.x = (self.r * self.x * (1.0 - self.x)).clamp(LOW, HIGH);
        self.x
    }

    pub fn value(&self) -> f64 {
        self.x
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub(crate) fn set_parts(&mut self, x: f64, r: f64) {
        self.x = x;
        self.r = r;
    }
}

/// Domain check shared by construction and snapshot restore.
pub(crate) fn validate(x: f64, r: f64) -> Result<()> {
    if !(x.is_finite() && x > 0.0 && x < 1.0) {
        return Err(RngError::invalid(format!(
            "logistic seed must be strictly between 0 and 1, got {x}"
        )));
    }
    if !(r.is_finite() && r > 0.0 && r <= 4.0) {
        return Err(RngError::invalid(format!(
            "logistic r must be in (0, 4], got {r}"
        )));
    }
    Ok(())
}

impl Default for Logistic {
    fn default() -> Self {
        Self {
            x: DEFAULT_X,
            r: DEFAULT_R,
        }
    }
}

impl BitGenerator for Logistic {
    fn next(&mut self) -> u64 {
        (self.step() * RAW_SCALE) as u64
    }

    fn width(&self) -> u32 {
        53
    }

    /// The map value itself.
    fn next_float(&mut self) -> f64 {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_map_once_per_call() {
        let mut g = Logistic::new(0.5, 3.99).unwrap();
        let x = g.next_float();
        assert_eq!(x, 3.99 * 0.5 * 0.5);
        let y = g.next_float();
        assert_eq!(y, 3.99 * x * (1.0 - x));
    }

    #[test]
    fn rejects_out_of_domain_parameters() {
        assert!(Logistic::new(0.0, 3.9).is_err());
        assert!(Logistic::new(1.0, 3.9).is_err());
        assert!(Logistic::new(f64::NAN, 3.9).is_err());
        assert!(Logistic::new(0.3, 0.0).is_err());
        assert!(Logistic::new(0.3, 4.1).is_err());
        assert!(Logistic::new(0.3, 4.0).is_ok());
    }

    #[test]
    fn r_four_from_half_does_not_collapse_to_zero() {
        // Exact arithmetic gives 0.5 → 1 → 0 → 0 ...
        let mut g = Logistic::new(0.5, 4.0).unwrap();
        for _ in 0..100 {
            let v = g.next_float();
            assert!(v > 0.0 && v < 1.0, "left the open interval: {v}");
        }
    }

    #[test]
    fn small_seeds_give_distinct_streams() {
        let streams: Vec<Vec<u64>> = [1u64, 2, 42, 1_000_000_000]
            .into_iter()
            .map(|seed| {
                let mut g = Logistic::from_seed(seed);
                (0..8).map(|_| g.next()).collect()
            })
            .collect();
        for i in 0..streams.len() {
            for j in i + 1..streams.len() {
                assert_ne!(streams[i], streams[j], "seeds #{i} and #{j} collide");
            }
        }
    }

    #[test]
    fn raw_output_fits_53_bits() {
        let mut g = Logistic::from_seed(12345);
        for _ in 0..10_000 {
            assert!(g.next() < (1u64 << 53));
        }
    }

    #[test]
    fn bounded_ints_stay_in_range() {
        let mut g = Logistic::default();
        for _ in 0..1000 {
            assert!(g.next_int(6).unwrap() < 6);
        }
    }
}
