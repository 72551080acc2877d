//! Abstract entropy source trait.
//!
//! Every entropy reader implements the [`EntropySource`] trait, which provides
//! metadata via [`SourceInfo`], availability checking, and a single raw
//! 64-bit reading. Readings are individually weak: they may be zero, repeat
//! between calls, or be predictable. Only the mixer turns them into seeds.

/// Category of entropy source based on where the signal comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    /// Clock readings and timing jitter.
    Timing,
    /// Process and OS counters.
    System,
    /// The operating system's CSPRNG.
    Os,
}

impl std::fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timing => write!(f, "timing"),
            Self::System => write!(f, "system"),
            Self::Os => write!(f, "os"),
        }
    }
}

/// Metadata about an entropy source.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// Unique identifier (e.g. `"coarse_timer"`).
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// Source category for classification.
    pub category: SourceCategory,
    /// Rough estimate of unpredictable bits per reading.
    pub entropy_bits_estimate: f64,
}

/// Trait that every entropy source must implement.
pub trait EntropySource {
    /// Source metadata.
    fn info(&self) -> &SourceInfo;

    /// Check if this source can produce meaningful readings on this machine.
    fn is_available(&self) -> bool;

    /// Take one raw reading. Unavailable or failing sources return 0.
    fn sample(&mut self) -> u64;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(u64);

    static CONSTANT_INFO: SourceInfo = SourceInfo {
        name: "constant",
        description: "Always returns the same value",
        category: SourceCategory::System,
        entropy_bits_estimate: 0.0,
    };

    impl EntropySource for Constant {
        fn info(&self) -> &SourceInfo {
            &CONSTANT_INFO
        }

        fn is_available(&self) -> bool {
            true
        }

        fn sample(&mut self) -> u64 {
            self.0
        }
    }

    #[test]
    fn default_name_comes_from_info() {
        let mut src = Constant(9);
        assert_eq!(src.name(), "constant");
        assert_eq!(src.sample(), 9);
    }

    #[test]
    fn category_display() {
        assert_eq!(SourceCategory::Timing.to_string(), "timing");
        assert_eq!(SourceCategory::System.to_string(), "system");
        assert_eq!(SourceCategory::Os.to_string(), "os");
    }
}
