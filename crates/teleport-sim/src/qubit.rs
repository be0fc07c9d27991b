//! Qubit handles and measurement outcomes.

use std::fmt;

/// Handle to a qubit owned by a [`QuantumSimulator`](crate::QuantumSimulator).
///
/// Ids are never reused within one simulator, so a stale handle is always
/// reported as unknown rather than aliasing a newer qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Result of a single-qubit Z-basis measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The qubit collapsed to |0⟩.
    Zero,
    /// The qubit collapsed to |1⟩.
    One,
}

impl Outcome {
    /// Whether this is [`Outcome::One`].
    pub fn is_one(self) -> bool {
        self == Outcome::One
    }
}

impl From<bool> for Outcome {
    fn from(bit: bool) -> Self {
        if bit { Outcome::One } else { Outcome::Zero }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => write!(f, "Zero"),
            Outcome::One => write!(f, "One"),
        }
    }
}
