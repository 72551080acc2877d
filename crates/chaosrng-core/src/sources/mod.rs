//! Entropy source implementations.
//!
//! Three weak readers feed the [`EntropyMixer`](crate::entropy::EntropyMixer):
//!
//! | Source | Category | Signal |
//! |---|---|---|
//! | [`TimerSource`] | timing | monotonic µs ⊕ wall-clock ns |
//! | [`MemorySource`] | system | `getrusage` RSS and fault counters |
//! | [`OsRandomSource`] | os | `getrandom`, cached per byte length |

pub mod helpers;
mod memory;
mod os;
mod timer;

pub use memory::MemorySource;
pub use os::{DEFAULT_CACHE_TTL, MAX_OS_BYTES, OsRandomCache, OsRandomSource};
pub use timer::TimerSource;
