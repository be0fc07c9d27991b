//! Console report for the experiment phases.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// Line printed when the received value matches the sent one.
pub const SUCCESS_LINE: &str = "Teleportation Successful!";

/// The two experiment phases, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Classical bits: qubits in |0⟩ and |1⟩ only.
    Classical,
    /// The superposition states H+ and H-.
    Nonclassical,
}

impl Phase {
    /// All phases in run order.
    pub const ALL: [Phase; 2] = [Phase::Classical, Phase::Nonclassical];

    /// Display label for a sent or received value.
    pub fn label(self, value: bool) -> &'static str {
        match (self, value) {
            (Phase::Classical, true) => "True",
            (Phase::Classical, false) => "False",
            (Phase::Nonclassical, true) => "H+",
            (Phase::Nonclassical, false) => "H-",
        }
    }

    /// Introductory text printed before the phase's first round.
    pub fn banner(self) -> &'static str {
        match self {
            Phase::Classical => {
                "For our first trick, we'll use quantum teleportation to send classical bits.\n\
                 That is, we'll send and receive qubits in states |0> and |1> only.\n\n\n"
            }
            Phase::Nonclassical => {
                "\n\nFor our second trick, we'll quantum teleport states 1/sqrt(2) * (|0> +/- |1>) .\n\
                 We'll use H+ and H- as names for these two states.\n\n\n"
            }
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Classical => write!(f, "classical"),
            Phase::Nonclassical => write!(f, "nonclassical"),
        }
    }
}

/// One sample-and-compare iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// Zero-based round index within the phase.
    pub round: usize,
    /// Value handed to the teleportation operation.
    pub sent: bool,
    /// Value read back at the far end.
    pub received: bool,
}

impl TrialOutcome {
    /// Whether the value survived teleportation.
    pub fn succeeded(&self) -> bool {
        self.sent == self.received
    }
}

/// Write the phase banner.
pub fn write_banner<W: Write + ?Sized>(out: &mut W, phase: Phase) -> io::Result<()> {
    out.write_all(phase.banner().as_bytes())
}

/// Write the round line and the verdict line for one trial.
pub fn write_trial<W: Write + ?Sized>(
    out: &mut W,
    phase: Phase,
    trial: &TrialOutcome,
) -> io::Result<()> {
    writeln!(
        out,
        "Round {}:\t Sent {}, \t Received {}.",
        trial.round,
        phase.label(trial.sent),
        phase.label(trial.received)
    )?;
    if trial.succeeded() {
        writeln!(out, "{SUCCESS_LINE}")
    } else {
        writeln!(out, "\n")
    }
}
