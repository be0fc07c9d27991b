//! Teleport Local Statevector Simulator
//!
//! A small, exact simulator for qubit-level programs that allocate qubits on
//! demand, apply gates, measure mid-program and branch on the outcome. It is
//! the simulator resource the teleportation experiments run against.
//!
//! # Features
//!
//! - **Dynamic register**: qubits are allocated and released individually;
//!   released qubits must be back in |0⟩.
//! - **Mid-circuit measurement**: Z-basis measurement collapses the state so
//!   later gates can be classically conditioned on it.
//! - **Seedable**: a fixed seed makes every measurement outcome reproducible.
//!
//! # Example
//!
//! ```
//! use teleport_sim::{Outcome, QuantumSimulator};
//!
//! let mut sim = QuantumSimulator::with_seed(7);
//! let q = sim.allocate()?;
//! sim.x(q)?;
//! assert_eq!(sim.measure_reset(q)?, Outcome::One);
//! sim.release(q)?;
//! # Ok::<(), teleport_sim::SimError>(())
//! ```

pub mod error;
pub mod qubit;
mod simulator;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use qubit::{Outcome, QubitId};
pub use simulator::{DEFAULT_MAX_QUBITS, QuantumSimulator};
pub use statevector::Statevector;
