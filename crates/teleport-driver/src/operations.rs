//! Teleportation routines.
//!
//! Each routine allocates the qubits it needs, runs the protocol and hands
//! every qubit back in |0⟩ before returning.

use tracing::trace;

use teleport_sim::{Outcome, QuantumSimulator, QubitId, SimResult};

/// Teleport the state of `msg` onto `target`.
///
/// A helper qubit is entangled with `target` into a Bell pair, `msg` is
/// measured jointly with the helper, and the two classical outcomes drive
/// the Z and X corrections on `target`. `msg` ends in |0⟩.
pub fn teleport(sim: &mut QuantumSimulator, msg: QubitId, target: QubitId) -> SimResult<()> {
    let helper = sim.allocate()?;

    sim.h(helper)?;
    sim.cnot(helper, target)?;

    sim.cnot(msg, helper)?;
    sim.h(msg)?;

    let phase_bit = sim.measure_reset(msg)?;
    if phase_bit.is_one() {
        sim.z(target)?;
    }
    let flip_bit = sim.measure_reset(helper)?;
    if flip_bit.is_one() {
        sim.x(target)?;
    }
    trace!(%phase_bit, %flip_bit, "corrections applied");

    sim.release(helper)
}

/// Send a classical bit through teleportation and read it back.
///
/// The message qubit is prepared in |0⟩ or |1⟩, teleported, and the target
/// is measured in the Z basis.
pub fn teleport_classical_message(sim: &mut QuantumSimulator, message: bool) -> SimResult<bool> {
    let msg = sim.allocate()?;
    let target = sim.allocate()?;

    if message {
        sim.x(msg)?;
    }
    teleport(sim, msg, target)?;
    let received = sim.measure_reset(target)? == Outcome::One;

    sim.release_all(&[msg, target])?;
    Ok(received)
}

/// Teleport |+⟩ (`positive == true`) or |−⟩ and read back which one arrived.
///
/// The target is measured in the X basis, so no information about the sign
/// is available before teleportation completes.
pub fn teleport_nonclassical_qubit(
    sim: &mut QuantumSimulator,
    positive: bool,
) -> SimResult<bool> {
    let msg = sim.allocate()?;
    let target = sim.allocate()?;

    if !positive {
        sim.x(msg)?;
    }
    sim.h(msg)?;

    teleport(sim, msg, target)?;

    sim.h(target)?;
    let received = sim.measure_reset(target)? == Outcome::Zero;

    sim.release_all(&[msg, target])?;
    Ok(received)
}

/// Something that can run the two teleportation experiments.
///
/// [`QuantumSimulator`] is the real implementation; the driver only depends
/// on this trait so it can be exercised with deterministic stand-ins.
pub trait Teleporter {
    /// Teleport a classical bit and return the bit read at the far end.
    fn teleport_classical(&mut self, bit: bool) -> SimResult<bool>;

    /// Teleport an H+ (`true`) / H- (`false`) state and return the sign read
    /// at the far end.
    fn teleport_nonclassical(&mut self, positive: bool) -> SimResult<bool>;
}

impl Teleporter for QuantumSimulator {
    fn teleport_classical(&mut self, bit: bool) -> SimResult<bool> {
        teleport_classical_message(self, bit)
    }

    fn teleport_nonclassical(&mut self, positive: bool) -> SimResult<bool> {
        teleport_nonclassical_qubit(self, positive)
    }
}
