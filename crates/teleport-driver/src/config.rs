//! Experiment configuration.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use teleport_sim::{DEFAULT_MAX_QUBITS, QuantumSimulator};

use crate::error::{DriverError, DriverResult};

/// Qubits held at once by a single teleportation: message, target, helper.
pub const QUBITS_PER_TELEPORT: usize = 3;

/// Settings for one run of both experiment phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Fixed seed for the sent values and measurement draws.
    /// `None` seeds from OS entropy, so runs are not reproducible.
    pub seed: Option<u64>,
    /// Register width of the simulator.
    pub max_qubits: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

impl ExperimentConfig {
    /// Config with a fixed seed and default limits.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check the config can run a teleportation at all.
    pub fn validate(&self) -> DriverResult<()> {
        if self.max_qubits < QUBITS_PER_TELEPORT {
            return Err(DriverError::Configuration(format!(
                "max_qubits must be at least {QUBITS_PER_TELEPORT}, got {}",
                self.max_qubits
            )));
        }
        Ok(())
    }

    /// Random source for the sent values.
    pub fn driver_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Acquire a simulator configured by these settings.
    ///
    /// A fixed seed is offset by one for the simulator so sent values and
    /// measurement draws come from different streams.
    pub fn simulator(&self) -> QuantumSimulator {
        let sim = match self.seed {
            Some(seed) => QuantumSimulator::with_seed(seed.wrapping_add(1)),
            None => QuantumSimulator::new(),
        };
        sim.with_max_qubits(self.max_qubits)
    }
}
