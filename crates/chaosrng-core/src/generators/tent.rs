//! Tent map `x ← mu·x` (x < ½) or `mu·(1−x)` used as a bit generator.
//!
//! **Limitation:** like the logistic map, this is a chaotic system with
//! correlated, non-uniform output. In binary floating point the map with
//! `mu = 2` shifts mantissa bits out and collapses onto a short cycle; the
//! state is clamped to `[1e-5, 0.99999]` to keep it away from the endpoints,
//! which bounds but does not remove the loss of entropy.

use crate::error::{Result, RngError};

use super::{BitGenerator, unit_from_seed};

pub const DEFAULT_X: f64 = 0.5;
pub const DEFAULT_MU: f64 = 1.95;

const LOW: f64 = 0.00001;
const HIGH: f64 = 0.99999;

const RAW_SCALE: f64 = (1u64 << 53) as f64;

/// Tent-map generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Tent {
    x: f64,
    mu: f64,
}

impl Tent {
    /// `x` in `[0, 1]` (clamped to `[1e-5, 0.99999]`), `mu` in `(0, 2]`.
    pub fn new(x: f64, mu: f64) -> Result<Self> {
        validate(x, mu)?;
        Ok(Self {
            x: x.clamp(LOW, HIGH),
            mu,
        })
    }

    /// Map a 64-bit seed onto `[1e-5, 0.99999]` with the default `mu`.
    ///
    /// The unit value is scaled into the clamp window rather than clamped,
    /// so distinct seeds keep distinct starting points.
    pub fn from_seed(seed: u64) -> Self {
        let u = unit_from_seed(seed);
        Self {
            x: (LOW + u * (HIGH - LOW)).clamp(LOW, HIGH),
            mu: DEFAULT_MU,
        }
    }

    fn step(&mut self) -> f64 {
        let x = if self.x < 0.5 {
            self.mu * self.x
        } else {
            self.mu * (1.0 - self.x)
        };
        self.x = x.clamp(LOW, HIGH);
        self.x
    }

    pub fn value(&self) -> f64 {
        self.x
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub(crate) fn set_parts(&mut self, x: f64, mu: f64) {
        self.x = x.clamp(LOW, HIGH);
        self.mu = mu;
    }
}

pub(crate) fn validate(x: f64, mu: f64) -> Result<()> {
    if !(x.is_finite() && (0.0..=1.0).contains(&x)) {
        return Err(RngError::invalid(format!(
            "tent seed must be between 0 and 1, got {x}"
        )));
    }
    if !(mu.is_finite() && mu > 0.0 && mu <= 2.0) {
        return Err(RngError::invalid(format!(
            "tent mu must be in (0, 2], got {mu}"
        )));
    }
    Ok(())
}

impl Default for Tent {
    fn default() -> Self {
        Self {
            x: DEFAULT_X,
            mu: DEFAULT_MU,
        }
    }
}

impl BitGenerator for Tent {
    fn next(&mut self) -> u64 {
        (self.step() * RAW_SCALE) as u64
    }

    fn width(&self) -> u32 {
        53
    }

    fn next_float(&mut self) -> f64 {
        self.step()
    }
}
