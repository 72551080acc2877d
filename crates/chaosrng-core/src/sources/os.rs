//! OsRandomSource — bytes from the operating system CSPRNG.
//!
//! The only strong input to the mixer, and the only expensive one: every
//! read is a syscall. Reads are therefore cached for a short window in an
//! explicit [`OsRandomCache`] owned by the source. A stale hit just repeats a
//! value the mixer has already seen, which the other sources perturb.

use std::time::{Duration, Instant};

use crate::conditioning::fold_bytes;
use crate::source::{EntropySource, SourceCategory, SourceInfo};

/// Upper bound on the bytes requested per read.
pub const MAX_OS_BYTES: usize = 64;

/// Default cache window.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(100);

static OS_RANDOM_INFO: SourceInfo = SourceInfo {
    name: "os_random",
    description: "Operating system CSPRNG via getrandom(), cached briefly",
    category: SourceCategory::Os,
    entropy_bits_estimate: 64.0,
};

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    taken_at: Instant,
    bytes: usize,
    value: u64,
}

/// Short-lived cache of the last OS-randomness read, keyed by byte length.
#[derive(Debug, Clone)]
pub struct OsRandomCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl OsRandomCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Cached value for `bytes` if it is younger than the TTL.
    pub fn lookup(&mut self, bytes: usize, now: Instant) -> Option<u64> {
        let hit = self.entry.and_then(|e| {
            let fresh = now.saturating_duration_since(e.taken_at) < self.ttl;
            (fresh && e.bytes == bytes).then_some(e.value)
        });
        if hit.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        hit
    }

    pub fn store(&mut self, bytes: usize, value: u64, now: Instant) {
        self.entry = Some(CacheEntry {
            taken_at: now,
            bytes,
            value,
        });
    }

    /// Drop the cached value so the next read goes to the OS.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for OsRandomCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Fill `buf` from the OS CSPRNG. Failure is reported, not fatal.
fn fill_from_os(buf: &mut [u8]) -> bool {
    match getrandom::fill(buf) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("OS randomness unavailable: {e}");
            false
        }
    }
}

/// Entropy source backed by the OS CSPRNG with a per-source cache.
#[derive(Debug, Clone)]
pub struct OsRandomSource {
    bytes: usize,
    cache: OsRandomCache,
}

impl OsRandomSource {
    /// `bytes` is clamped to `1..=MAX_OS_BYTES`.
    pub fn new(bytes: usize, ttl: Duration) -> Self {
        Self {
            bytes: bytes.clamp(1, MAX_OS_BYTES),
            cache: OsRandomCache::new(ttl),
        }
    }

    /// Read `bytes` bytes of OS randomness folded into 64 bits, honouring
    /// the cache. Returns 0 if the OS refuses.
    pub fn read(&mut self, bytes: usize) -> u64 {
        let bytes = bytes.clamp(1, MAX_OS_BYTES);
        let now = Instant::now();
        if let Some(value) = self.cache.lookup(bytes, now) {
            log::trace!("os_random cache hit ({bytes} bytes)");
            return value;
        }
        log::trace!("os_random cache miss ({bytes} bytes)");

        let mut buf = [0u8; MAX_OS_BYTES];
        let buf = &mut buf[..bytes];
        if !fill_from_os(buf) {
            return 0;
        }
        let value = fold_bytes(buf);
        self.cache.store(bytes, value, now);
        value
    }

    pub fn cache(&self) -> &OsRandomCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for OsRandomSource {
    fn default() -> Self {
        Self::new(8, DEFAULT_CACHE_TTL)
    }
}

impl EntropySource for OsRandomSource {
    fn info(&self) -> &SourceInfo {
        &OS_RANDOM_INFO
    }

    fn is_available(&self) -> bool {
        let mut probe = [0u8; 1];
        getrandom::fill(&mut probe).is_ok()
    }

    fn sample(&mut self) -> u64 {
        self.read(self.bytes)
    }
}
