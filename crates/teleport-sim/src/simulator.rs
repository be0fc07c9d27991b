//! Scoped simulator resource.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument, trace, warn};

use crate::error::{SimError, SimResult};
use crate::qubit::{Outcome, QubitId};
use crate::statevector::{Statevector, TOLERANCE};

/// Default register width.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Local statevector simulator.
///
/// Qubits are allocated on demand and must be handed back in |0⟩. The
/// simulator owns its random source; construct it with
/// [`QuantumSimulator::with_seed`] for reproducible measurement outcomes.
/// Dropping the simulator releases the whole register.
pub struct QuantumSimulator {
    state: Statevector,
    /// Qubit id to statevector slot.
    slots: FxHashMap<QubitId, usize>,
    /// Slot to qubit id, kept in step with `slots`.
    order: Vec<QubitId>,
    next_id: usize,
    max_qubits: usize,
    seed: Option<u64>,
    rng: StdRng,
}

impl QuantumSimulator {
    /// Create a simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self::build(None, DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with a fixed measurement seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(Some(seed), DEFAULT_MAX_QUBITS)
    }

    /// Limit the number of simultaneously allocated qubits.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    fn build(seed: Option<u64>, max_qubits: usize) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        debug!(?seed, max_qubits, "simulator acquired");
        Self {
            state: Statevector::new(0),
            slots: FxHashMap::default(),
            order: Vec::new(),
            next_id: 0,
            max_qubits,
            seed,
            rng,
        }
    }

    /// Seed used for measurement sampling, if one was fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Maximum number of simultaneously allocated qubits.
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    /// Number of currently allocated qubits.
    pub fn num_allocated(&self) -> usize {
        self.order.len()
    }

    /// Whether `qubit` is currently allocated.
    pub fn is_allocated(&self, qubit: QubitId) -> bool {
        self.slots.contains_key(&qubit)
    }

    fn slot(&self, qubit: QubitId) -> SimResult<usize> {
        self.slots
            .get(&qubit)
            .copied()
            .ok_or(SimError::UnknownQubit(qubit))
    }

    fn slot_pair(&self, a: QubitId, b: QubitId) -> SimResult<(usize, usize)> {
        if a == b {
            return Err(SimError::DuplicateQubit(a));
        }
        Ok((self.slot(a)?, self.slot(b)?))
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Allocate a fresh qubit in |0⟩.
    pub fn allocate(&mut self) -> SimResult<QubitId> {
        if self.order.len() >= self.max_qubits {
            return Err(SimError::QubitLimitExceeded {
                max: self.max_qubits,
            });
        }
        let id = QubitId(self.next_id);
        self.next_id += 1;

        let slot = self.state.add_qubit();
        self.slots.insert(id, slot);
        self.order.push(id);
        trace!(qubit = %id, slot, "allocated");
        Ok(id)
    }

    /// Allocate `n` qubits at once.
    pub fn allocate_many(&mut self, n: usize) -> SimResult<Vec<QubitId>> {
        if self.order.len() + n > self.max_qubits {
            return Err(SimError::QubitLimitExceeded {
                max: self.max_qubits,
            });
        }
        (0..n).map(|_| self.allocate()).collect()
    }

    /// Release a qubit. It must already be in |0⟩.
    pub fn release(&mut self, qubit: QubitId) -> SimResult<()> {
        let slot = self.slot(qubit)?;
        let probability_one = self.state.probability_one(slot);
        if probability_one > TOLERANCE {
            return Err(SimError::ReleasedQubitNotZero {
                qubit,
                probability_one,
            });
        }

        self.state.remove_qubit(slot);
        self.slots.remove(&qubit);
        self.order.remove(slot);
        for id in &self.order[slot..] {
            if let Some(s) = self.slots.get_mut(id) {
                *s -= 1;
            }
        }
        trace!(%qubit, "released");
        Ok(())
    }

    /// Release several qubits in order, stopping at the first failure.
    pub fn release_all(&mut self, qubits: &[QubitId]) -> SimResult<()> {
        qubits.iter().try_for_each(|&q| self.release(q))
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Hadamard.
    pub fn h(&mut self, qubit: QubitId) -> SimResult<()> {
        let slot = self.slot(qubit)?;
        self.state.apply_h(slot);
        Ok(())
    }

    /// Pauli X.
    pub fn x(&mut self, qubit: QubitId) -> SimResult<()> {
        let slot = self.slot(qubit)?;
        self.state.apply_x(slot);
        Ok(())
    }

    /// Pauli Z.
    pub fn z(&mut self, qubit: QubitId) -> SimResult<()> {
        let slot = self.slot(qubit)?;
        self.state.apply_z(slot);
        Ok(())
    }

    /// Controlled-X.
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> SimResult<()> {
        let (c, t) = self.slot_pair(control, target)?;
        self.state.apply_cx(c, t);
        Ok(())
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Probability of observing |1⟩ on `qubit`, without disturbing the state.
    pub fn probability_one(&self, qubit: QubitId) -> SimResult<f64> {
        Ok(self.state.probability_one(self.slot(qubit)?))
    }

    /// Measure in the Z basis, collapsing the state.
    #[instrument(level = "trace", skip(self))]
    pub fn measure(&mut self, qubit: QubitId) -> SimResult<Outcome> {
        let slot = self.slot(qubit)?;
        let draw: f64 = self.rng.r#gen();
        let outcome = Outcome::from(self.state.measure(slot, draw));
        trace!(%outcome, "measured");
        Ok(outcome)
    }

    /// Measure in the Z basis, then return the qubit to |0⟩.
    pub fn measure_reset(&mut self, qubit: QubitId) -> SimResult<Outcome> {
        let outcome = self.measure(qubit)?;
        if outcome.is_one() {
            self.x(qubit)?;
        }
        Ok(outcome)
    }

    /// Return the qubit to |0⟩, discarding its measurement outcome.
    pub fn reset(&mut self, qubit: QubitId) -> SimResult<()> {
        self.measure_reset(qubit).map(|_| ())
    }
}

impl Default for QuantumSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for QuantumSimulator {
    fn drop(&mut self) {
        if !self.order.is_empty() {
            warn!(
                allocated = self.order.len(),
                "simulator dropped with qubits still allocated"
            );
        }
        debug!("simulator released");
    }
}
