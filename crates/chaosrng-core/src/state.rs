//! Generator state snapshots.
//!
//! A [`StateSnapshot`] is a plain, serializable copy of everything a
//! generator needs to resume its stream. Restoring a snapshot makes the
//! generator produce exactly the values it would have produced after the
//! save point. Snapshots are tagged with their [`GeneratorKind`]; restoring
//! into a different kind fails with [`RngError::KindMismatch`].
//!
//! Restore is all-or-nothing: the snapshot is fully validated before any
//! field of the target is written.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RngError};
use crate::generators::{
    Generator, GeneratorKind, Logistic, Mixer, Mt19937, Pcg64, SplitMix64, Tent, Xorshift64,
};

const MT_WORDS: usize = 624;

/// Saved internal state of one generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StateSnapshot {
    Xorshift64 { state: u64 },
    SplitMix64 { state: u64 },
    Pcg64 { state: u64, inc: u64 },
    Mt19937 { words: Vec<u32>, index: usize },
    Logistic { x: f64, r: f64 },
    Tent { x: f64, mu: f64 },
    Mixer {
        first: Box<StateSnapshot>,
        second: Box<StateSnapshot>,
    },
}

impl StateSnapshot {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Xorshift64 { .. } => GeneratorKind::Xorshift64,
            Self::SplitMix64 { .. } => GeneratorKind::SplitMix64,
            Self::Pcg64 { .. } => GeneratorKind::Pcg64,
            Self::Mt19937 { .. } => GeneratorKind::Mt19937,
            Self::Logistic { .. } => GeneratorKind::Logistic,
            Self::Tent { .. } => GeneratorKind::Tent,
            Self::Mixer { .. } => GeneratorKind::Mixer,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| RngError::invalid(format!("snapshot is not serializable: {e}")))
    }

    /// Parse a snapshot written by [`to_json`](Self::to_json).
    ///
    /// Only the shape is checked here; value domains are checked on restore.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RngError::invalid(format!("snapshot: {e}")))
    }

    /// Check that the values are a reachable state of their kind.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Xorshift64 { state } => {
                if *state == 0 {
                    return Err(RngError::invalid("xorshift64 state must be nonzero"));
                }
            }
            Self::SplitMix64 { .. } => {}
            Self::Pcg64 { inc, .. } => {
                if inc & 1 == 0 {
                    return Err(RngError::invalid(format!(
                        "pcg64 increment must be odd, got {inc}"
                    )));
                }
            }
            Self::Mt19937 { words, index } => {
                if words.len() != MT_WORDS {
                    return Err(RngError::invalid(format!(
                        "mt19937 state needs {MT_WORDS} words, got {}",
                        words.len()
                    )));
                }
                if *index > MT_WORDS {
                    return Err(RngError::invalid(format!(
                        "mt19937 index must be at most {MT_WORDS}, got {index}"
                    )));
                }
                if words.iter().all(|&w| w == 0) {
                    return Err(RngError::invalid("mt19937 state must not be all zero"));
                }
            }
            Self::Logistic { x, r } => crate::generators::validate_logistic(*x, *r)?,
            Self::Tent { x, mu } => crate::generators::validate_tent(*x, *mu)?,
            Self::Mixer { first, second } => {
                first.validate()?;
                second.validate()?;
            }
        }
        Ok(())
    }

    fn expect_kind(&self, expected: GeneratorKind) -> Result<()> {
        let found = self.kind();
        if found != expected {
            return Err(RngError::KindMismatch { expected, found });
        }
        self.validate()
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Save and restore support.
///
/// Every built-in generator implements both methods. The defaults report
/// [`RngError::UnsupportedOperation`], so a custom
/// [`BitGenerator`](crate::BitGenerator) can opt in with an empty impl and
/// still be passed to code that snapshots generically.
pub trait Stateful {
    fn save_state(&self) -> Result<StateSnapshot> {
        Err(RngError::UnsupportedOperation(format!(
            "{} does not support state snapshots",
            std::any::type_name::<Self>()
        )))
    }

    fn restore_state(&mut self, _snapshot: &StateSnapshot) -> Result<()> {
        Err(RngError::UnsupportedOperation(format!(
            "{} does not support state restore",
            std::any::type_name::<Self>()
        )))
    }
}

impl Stateful for Xorshift64 {
    fn save_state(&self) -> Result<StateSnapshot> {
        Ok(StateSnapshot::Xorshift64 { state: self.state() })
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        snapshot.expect_kind(GeneratorKind::Xorshift64)?;
        if let StateSnapshot::Xorshift64 { state } = snapshot {
            self.set_state(*state);
        }
        Ok(())
    }
}

impl Stateful for SplitMix64 {
    fn save_state(&self) -> Result<StateSnapshot> {
        Ok(StateSnapshot::SplitMix64 { state: self.state() })
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        snapshot.expect_kind(GeneratorKind::SplitMix64)?;
        if let StateSnapshot::SplitMix64 { state } = snapshot {
            self.set_state(*state);
        }
        Ok(())
    }
}

impl Stateful for Pcg64 {
    fn save_state(&self) -> Result<StateSnapshot> {
        Ok(StateSnapshot::Pcg64 {
            state: self.state(),
            inc: self.increment(),
        })
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        snapshot.expect_kind(GeneratorKind::Pcg64)?;
        if let StateSnapshot::Pcg64 { state, inc } = snapshot {
            self.set_parts(*state, *inc);
        }
        Ok(())
    }
}

impl Stateful for Mt19937 {
    fn save_state(&self) -> Result<StateSnapshot> {
        Ok(StateSnapshot::Mt19937 {
            words: self.words().to_vec(),
            index: self.index(),
        })
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        snapshot.expect_kind(GeneratorKind::Mt19937)?;
        if let StateSnapshot::Mt19937 { words, index } = snapshot {
            self.set_parts(words, *index);
        }
        Ok(())
    }
}

impl Stateful for Logistic {
    fn save_state(&self) -> Result<StateSnapshot> {
        Ok(StateSnapshot::Logistic {
            x: self.value(),
            r: self.r(),
        })
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        snapshot.expect_kind(GeneratorKind::Logistic)?;
        if let StateSnapshot::Logistic { x, r } = snapshot {
            self.set_parts(*x, *r);
        }
        Ok(())
    }
}

impl Stateful for Tent {
    fn save_state(&self) -> Result<StateSnapshot> {
        Ok(StateSnapshot::Tent {
            x: self.value(),
            mu: self.mu(),
        })
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        snapshot.expect_kind(GeneratorKind::Tent)?;
        if let StateSnapshot::Tent { x, mu } = snapshot {
            self.set_parts(*x, *mu);
        }
        Ok(())
    }
}

impl Stateful for Mixer {
    fn save_state(&self) -> Result<StateSnapshot> {
        Ok(StateSnapshot::Mixer {
            first: Box::new(self.first().save_state()?),
            second: Box::new(self.second().save_state()?),
        })
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        snapshot.expect_kind(GeneratorKind::Mixer)?;
        let StateSnapshot::Mixer { first, second } = snapshot else {
            return Ok(());
        };
        // Children may be of any kind, so restore into copies and commit
        // only when both succeed.
        let (a, b) = self.children_mut();
        let mut new_a = a.clone();
        let mut new_b = b.clone();
        new_a.restore_state(first)?;
        new_b.restore_state(second)?;
        *a = new_a;
        *b = new_b;
        Ok(())
    }
}

impl Stateful for Generator {
    fn save_state(&self) -> Result<StateSnapshot> {
        match self {
            Self::Xorshift64(g) => g.save_state(),
            Self::SplitMix64(g) => g.save_state(),
            Self::Pcg64(g) => g.save_state(),
            Self::Mt19937(g) => g.save_state(),
            Self::Logistic(g) => g.save_state(),
            Self::Tent(g) => g.save_state(),
            Self::Mixer(g) => g.save_state(),
        }
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        match self {
            Self::Xorshift64(g) => g.restore_state(snapshot),
            Self::SplitMix64(g) => g.restore_state(snapshot),
            Self::Pcg64(g) => g.restore_state(snapshot),
            Self::Mt19937(g) => g.restore_state(snapshot),
            Self::Logistic(g) => g.restore_state(snapshot),
            Self::Tent(g) => g.restore_state(snapshot),
            Self::Mixer(g) => g.restore_state(snapshot),
        }
    }
}

impl<S: Stateful + ?Sized> Stateful for Box<S> {
    fn save_state(&self) -> Result<StateSnapshot> {
        (**self).save_state()
    }

    fn restore_state(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        (**self).restore_state(snapshot)
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

pub fn save_state<S: Stateful + ?Sized>(target: &S) -> Result<StateSnapshot> {
    target.save_state()
}

pub fn restore_state<S: Stateful + ?Sized>(target: &mut S, snapshot: &StateSnapshot) -> Result<()> {
    target.restore_state(snapshot)
}

/// An independent copy that continues the same stream.
pub fn clone_generator<G: Clone>(g: &G) -> G {
    g.clone()
}
