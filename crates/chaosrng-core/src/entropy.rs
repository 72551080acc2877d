//! Entropy mixer: folds the weak sources into one usable 64-bit seed.
//!
//! Architecture:
//! 1. Read the coarse timer, the process memory footprint and the OS CSPRNG
//! 2. XOR the three readings (disabled sources contribute 0)
//! 3. Avalanche the result (xor-shift-33, multiply by `0xFF51AFD7ED558CCD`)
//! 4. Remap the degenerate zero seed to 1
//!
//! The OS read is cached inside the mixer's own [`OsRandomSource`]; there is
//! no process-global state, so two mixers never share a cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::conditioning::{avalanche, nonzero};
use crate::error::{Result, RngError};
use crate::source::EntropySource;
use crate::sources::{MAX_OS_BYTES, MemorySource, OsRandomSource, TimerSource};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for [`EntropyMixer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyConfig {
    /// How long an OS-randomness read may be reused, in milliseconds.
    pub cache_ttl_ms: u64,
    /// Bytes requested per OS read (1..=64).
    pub os_bytes: usize,
    pub use_timer: bool,
    pub use_memory: bool,
    pub use_os: bool,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            cache_ttl_ms: 100,
            os_bytes: 8,
            use_timer: true,
            use_memory: true,
            use_os: true,
        }
    }
}

impl EntropyConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RngError::invalid(format!("entropy config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.os_bytes == 0 || self.os_bytes > MAX_OS_BYTES {
            return Err(RngError::invalid(format!(
                "os_bytes must be between 1 and {MAX_OS_BYTES}, got {}",
                self.os_bytes
            )));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

// ---------------------------------------------------------------------------
// Mixer
// ---------------------------------------------------------------------------

/// Per-source readings behind one [`EntropyMixer::combined`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyReadings {
    pub timer: u64,
    pub memory: u64,
    pub os: u64,
}

impl EntropyReadings {
    /// XOR, avalanche, remap zero.
    pub fn mix(&self) -> u64 {
        nonzero(avalanche(self.timer ^ self.memory ^ self.os))
    }
}

/// Owns the three entropy sources and the OS-randomness cache.
#[derive(Debug, Clone)]
pub struct EntropyMixer {
    config: EntropyConfig,
    timer: TimerSource,
    memory: MemorySource,
    os: OsRandomSource,
}

impl EntropyMixer {
    /// Create a mixer after validating `config`.
    pub fn new(config: EntropyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: EntropyConfig) -> Self {
        let os = OsRandomSource::new(config.os_bytes, config.cache_ttl());
        Self {
            config,
            timer: TimerSource::new(),
            memory: MemorySource::new(),
            os,
        }
    }

    pub fn config(&self) -> &EntropyConfig {
        &self.config
    }

    /// Read every enabled source once.
    pub fn readings(&mut self) -> EntropyReadings {
        EntropyReadings {
            timer: if self.config.use_timer { self.timer.sample() } else { 0 },
            memory: if self.config.use_memory { self.memory.sample() } else { 0 },
            os: if self.config.use_os { self.os.sample() } else { 0 },
        }
    }

    /// One 64-bit seed from all enabled sources. Never returns 0.
    pub fn combined(&mut self) -> u64 {
        self.readings().mix()
    }

    /// Forget the cached OS read so the next call hits the OS again.
    pub fn clear_cache(&mut self) {
        self.os.clear_cache();
    }

    pub fn os_source(&self) -> &OsRandomSource {
        &self.os
    }

    /// Names of the sources that are enabled and available here.
    pub fn active_sources(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(3);
        if self.config.use_timer && self.timer.is_available() {
            names.push(self.timer.name());
        }
        if self.config.use_memory && self.memory.is_available() {
            names.push(self.memory.name());
        }
        if self.config.use_os && self.os.is_available() {
            names.push(self.os.name());
        }
        names
    }
}

impl Default for EntropyMixer {
    fn default() -> Self {
        Self::with_config(EntropyConfig::default())
    }
}

/// One seed from a fresh default mixer. Never returns 0.
///
/// Every call starts with an empty OS-randomness cache; hold an
/// [`EntropyMixer`] to reuse reads across calls.
pub fn combined() -> u64 {
    EntropyMixer::default().combined()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EntropyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_ttl(), Duration::from_millis(100));
    }

    #[test]
    fn config_from_partial_json_uses_defaults() {
        let config = EntropyConfig::from_json(r#"{"cache_ttl_ms": 250}"#).unwrap();
        assert_eq!(config.cache_ttl_ms, 250);
        assert_eq!(config.os_bytes, 8);
        assert!(config.use_os);
    }

    #[test]
    fn config_rejects_bad_byte_count() {
        let err = EntropyConfig::from_json(r#"{"os_bytes": 0}"#).unwrap_err();
        assert!(matches!(err, RngError::InvalidArgument(_)));
        let err = EntropyConfig::from_json(r#"{"os_bytes": 65}"#).unwrap_err();
        assert!(matches!(err, RngError::InvalidArgument(_)));
    }

    #[test]
    fn config_rejects_malformed_json() {
        assert!(EntropyConfig::from_json("{not json").is_err());
    }

    #[test]
    fn all_zero_readings_map_to_one() {
        let r = EntropyReadings {
            timer: 0,
            memory: 0,
            os: 0,
        };
        assert_eq!(r.mix(), 1);
    }

    #[test]
    fn cancelling_readings_map_to_one() {
        // Sources that XOR to zero must not yield the degenerate seed.
        let r = EntropyReadings {
            timer: 0xDEAD_BEEF,
            memory: 0xDEAD_BEEF,
            os: 0,
        };
        assert_eq!(r.mix(), 1);
    }

    #[test]
    fn mix_matches_finalizer() {
        let r = EntropyReadings {
            timer: 1,
            memory: 2,
            os: 4,
        };
        let x = 7u64;
        assert_eq!(r.mix(), (x ^ (x >> 33)).wrapping_mul(0xFF51_AFD7_ED55_8CCD));
    }

    #[test]
    fn disabled_sources_read_zero() {
        let config = EntropyConfig {
            use_timer: false,
            use_memory: false,
            use_os: false,
            ..Default::default()
        };
        let mut mixer = EntropyMixer::new(config).unwrap();
        let r = mixer.readings();
        assert_eq!((r.timer, r.memory, r.os), (0, 0, 0));
        assert_eq!(mixer.combined(), 1);
        assert!(mixer.active_sources().is_empty());
    }

    #[test]
    fn combined_is_never_zero() {
        let mut mixer = EntropyMixer::default();
        for _ in 0..100 {
            assert_ne!(mixer.combined(), 0);
        }
        assert_ne!(combined(), 0);
    }

    #[test]
    fn default_mixer_matches_default_config() {
        let a = EntropyMixer::default();
        let b = EntropyMixer::new(EntropyConfig::default()).unwrap();
        assert_eq!(a.config(), b.config());
        assert_eq!(a.os_source().cache().ttl(), b.os_source().cache().ttl());
        assert_eq!(a.active_sources(), b.active_sources());
    }

    #[test]
    fn mixer_reuses_cached_os_read() {
        let config = EntropyConfig {
            cache_ttl_ms: 60_000,
            ..Default::default()
        };
        let mut mixer = EntropyMixer::new(config).unwrap();
        let a = mixer.readings().os;
        let b = mixer.readings().os;
        assert_eq!(a, b);
        mixer.clear_cache();
        assert_ne!(mixer.readings().os, a);
    }
}
