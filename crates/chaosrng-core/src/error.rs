//! Error types shared by every fallible operation in the crate.
//!
//! All validation happens at the call boundary, before any draw is taken, so
//! an `Err` always means the generator state is exactly as it was before the
//! call.

use crate::generators::GeneratorKind;

/// Errors produced by generators, the facade, seeding and state snapshots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RngError {
    /// A parameter was out of its domain (`max == 0`, probability outside
    /// `[0, 1]`, empty slice, non-positive step, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The generator type does not implement state snapshots.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// A snapshot was restored into a generator of a different kind.
    #[error("snapshot kind mismatch: generator is {expected}, snapshot is {found}")]
    KindMismatch {
        expected: GeneratorKind,
        found: GeneratorKind,
    },
}

impl RngError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RngError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let err = RngError::invalid("max must be positive");
        assert_eq!(err.to_string(), "invalid argument: max must be positive");
    }

    #[test]
    fn display_kind_mismatch() {
        let err = RngError::KindMismatch {
            expected: GeneratorKind::Pcg64,
            found: GeneratorKind::Mt19937,
        };
        assert_eq!(
            err.to_string(),
            "snapshot kind mismatch: generator is pcg64, snapshot is mt19937"
        );
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(
            RngError::UnsupportedOperation("x".into()),
            RngError::UnsupportedOperation("x".into())
        );
        assert_ne!(
            RngError::invalid("a"),
            RngError::UnsupportedOperation("a".into())
        );
    }
}
