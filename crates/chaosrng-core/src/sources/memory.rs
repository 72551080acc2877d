//! MemorySource — process memory footprint and fault counters.
//!
//! Reads `getrusage(RUSAGE_SELF)` and packs the peak resident set size with
//! the minor/major page-fault and context-switch counters. The values drift
//! as the process allocates and is scheduled, but between two nearby calls
//! they are frequently identical.
//!
//! **Raw output characteristics:** low entropy, often repeating. Zero on
//! platforms without `getrusage`.

use crate::source::{EntropySource, SourceCategory, SourceInfo};

static MEMORY_INFO: SourceInfo = SourceInfo {
    name: "process_memory",
    description: "Peak resident set size and fault counters from getrusage()",
    category: SourceCategory::System,
    entropy_bits_estimate: 2.0,
};

/// Entropy source that reads the process memory footprint.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemorySource;

impl MemorySource {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
fn read_usage() -> Option<u64> {
    // SAFETY: rusage is plain old data; all-zero is a valid value.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    // SAFETY: getrusage writes into the struct we own and has no other
    // side effects.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return None;
    }
    let rss = usage.ru_maxrss as u64;
    let minflt = usage.ru_minflt as u64;
    let majflt = usage.ru_majflt as u64;
    let switches = (usage.ru_nvcsw as u64).wrapping_add(usage.ru_nivcsw as u64);
    Some(rss ^ minflt.rotate_left(24) ^ majflt.rotate_left(40) ^ switches.rotate_left(52))
}

#[cfg(not(unix))]
fn read_usage() -> Option<u64> {
    None
}

impl EntropySource for MemorySource {
    fn info(&self) -> &SourceInfo {
        &MEMORY_INFO
    }

    fn is_available(&self) -> bool {
        cfg!(unix)
    }

    fn sample(&mut self) -> u64 {
        read_usage().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_info() {
        let src = MemorySource::new();
        assert_eq!(src.name(), "process_memory");
        assert_eq!(src.info().category, SourceCategory::System);
    }

    #[test]
    #[cfg(unix)]
    fn memory_sample_reports_resident_set() {
        let mut src = MemorySource::new();
        assert!(src.is_available());
        // A running test binary always has a nonzero peak RSS.
        assert_ne!(src.sample(), 0);
    }
}
