//! Shared helpers used by multiple entropy source implementations.

use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Monotonic timestamp in nanoseconds relative to a process-local epoch.
///
/// The epoch is fixed the first time any source asks for it, so the value
/// grows from (near) zero over the lifetime of the process.
pub fn monotonic_nanos() -> u64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as u64
}

/// Wall-clock nanoseconds since the Unix epoch, truncated to 64 bits.
///
/// Returns 0 if the system clock is set before 1970.
pub fn wall_clock_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_nanos_is_monotonic() {
        let t1 = monotonic_nanos();
        let t2 = monotonic_nanos();
        assert!(t2 >= t1);
    }

    #[test]
    fn wall_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z in nanoseconds.
        assert!(wall_clock_nanos() > 1_577_836_800_000_000_000);
    }
}
