//! TimerSource — coarse high-resolution timer reading.
//!
//! **Raw output characteristics:** microseconds since the process epoch XOR
//! wall-clock nanoseconds. Two readings taken back to back usually differ
//! only in their low bits; the value is predictable to anyone who knows
//! roughly when the process started.

use crate::source::{EntropySource, SourceCategory, SourceInfo};

use super::helpers::{monotonic_nanos, wall_clock_nanos};

static TIMER_INFO: SourceInfo = SourceInfo {
    name: "coarse_timer",
    description: "Monotonic microseconds mixed with wall-clock nanoseconds",
    category: SourceCategory::Timing,
    entropy_bits_estimate: 8.0,
};

/// Entropy source reading the process timer and the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerSource;

impl TimerSource {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for TimerSource {
    fn info(&self) -> &SourceInfo {
        &TIMER_INFO
    }

    fn is_available(&self) -> bool {
        true
    }

    fn sample(&mut self) -> u64 {
        let micros = monotonic_nanos() / 1_000;
        micros ^ wall_clock_nanos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_info() {
        let src = TimerSource::new();
        assert_eq!(src.name(), "coarse_timer");
        assert_eq!(src.info().category, SourceCategory::Timing);
        assert!(src.is_available());
    }

    #[test]
    fn timer_sample_is_nonzero() {
        let mut src = TimerSource::new();
        assert_ne!(src.sample(), 0);
    }
}
