//! Statevector simulation engine.
//!
//! Qubits are addressed by *slot*: slot `i` is bit `i` of the basis index.
//! The register grows and shrinks as qubits are allocated and released.

use num_complex::Complex64;

/// Amplitudes below this norm are treated as zero.
pub(crate) const TOLERANCE: f64 = 1e-9;

/// A statevector representing a quantum state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Append a qubit in |0⟩ as the new highest slot and return that slot.
    pub fn add_qubit(&mut self) -> usize {
        let slot = self.num_qubits;
        let len = self.amplitudes.len();
        self.amplitudes.resize(len * 2, Complex64::new(0.0, 0.0));
        self.num_qubits += 1;
        slot
    }

    /// Drop a qubit that is in |0⟩, compacting every higher slot down by one.
    ///
    /// The caller must check [`Statevector::probability_one`] first; any
    /// amplitude on the |1⟩ branch of `slot` is discarded.
    pub fn remove_qubit(&mut self, slot: usize) {
        let low_mask = (1 << slot) - 1;
        let half = self.amplitudes.len() / 2;
        let compacted = (0..half)
            .map(|k| {
                let low = k & low_mask;
                let high = (k >> slot) << (slot + 1);
                self.amplitudes[high | low]
            })
            .collect();
        self.amplitudes = compacted;
        self.num_qubits -= 1;
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Pauli X on `qubit`.
    pub fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Pauli Z on `qubit`.
    pub fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    /// Hadamard on `qubit`.
    pub fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    /// Controlled-X with `control` and `target` slots.
    pub fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Probability of observing |1⟩ on `qubit`.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Measure `qubit` in the Z basis and collapse the state.
    ///
    /// `draw` is a uniform sample from `[0, 1)`; the outcome is |1⟩ when
    /// `draw < P(1)`. Returns `true` for |1⟩.
    pub fn measure(&mut self, qubit: usize, draw: f64) -> bool {
        let p_one = self.probability_one(qubit);
        // Snap near-definite states so rounding noise never selects an empty branch.
        let outcome = if p_one < TOLERANCE {
            false
        } else if p_one > 1.0 - TOLERANCE {
            true
        } else {
            draw < p_one
        };
        let kept = if outcome { p_one } else { 1.0 - p_one };

        let mask = 1 << qubit;
        let norm = kept.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if ((i & mask) != 0) == outcome {
                *amp /= norm;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        outcome
    }
}
