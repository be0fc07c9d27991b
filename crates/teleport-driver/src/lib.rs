//! Quantum teleportation experiments.
//!
//! Two experiments are run back to back on a [`teleport_sim::QuantumSimulator`]:
//!
//! - **Classical message**: a random bit is encoded as |0⟩ or |1⟩, teleported,
//!   and read back in the Z basis.
//! - **Non-classical qubit**: a random sign selects |+⟩ (H+) or |−⟩ (H-), which
//!   is teleported and read back in the X basis.
//!
//! Each experiment runs [`TRIALS_PER_PHASE`] rounds and prints one report line
//! per round plus a success verdict.
//!
//! # Example
//!
//! ```
//! use teleport_driver::{ExperimentConfig, run};
//!
//! let mut report = Vec::new();
//! let summary = run(&ExperimentConfig::seeded(42), &mut report)?;
//! assert_eq!(summary.total_trials(), 20);
//! assert!(summary.all_succeeded());
//! # Ok::<(), teleport_driver::DriverError>(())
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod operations;
pub mod report;

pub use config::ExperimentConfig;
pub use driver::{
    ExperimentSummary, PhaseSummary, TRIALS_PER_PHASE, run, run_experiments, run_phase,
    run_scoped,
};
pub use error::{DriverError, DriverResult};
pub use operations::{
    Teleporter, teleport, teleport_classical_message, teleport_nonclassical_qubit,
};
pub use report::{Phase, SUCCESS_LINE, TrialOutcome};
