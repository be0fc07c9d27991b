//! Error types for the simulator crate.

use thiserror::Error;

use crate::qubit::QubitId;

/// Errors that can occur while driving the simulator.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SimError {
    /// The qubit was never allocated or has already been released.
    #[error("Unknown qubit: {0}")]
    UnknownQubit(QubitId),

    /// Allocation would exceed the configured register width.
    #[error("Qubit limit exceeded: simulator supports at most {max} qubits")]
    QubitLimitExceeded {
        /// Configured maximum.
        max: usize,
    },

    /// A qubit must be returned to |0⟩ before it is released.
    #[error("Released qubit {qubit} is not in |0⟩ (P(1) = {probability_one:.6})")]
    ReleasedQubitNotZero {
        /// The offending qubit.
        qubit: QubitId,
        /// Probability of measuring |1⟩ at release time.
        probability_one: f64,
    },

    /// A multi-qubit gate was given the same qubit twice.
    #[error("Qubit {0} used more than once in the same gate")]
    DuplicateQubit(QubitId),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
