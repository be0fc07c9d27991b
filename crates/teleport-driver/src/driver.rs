//! Experiment driver.
//!
//! Runs the classical phase and then the non-classical phase, each for a
//! fixed [`TRIALS_PER_PHASE`] rounds, against any [`Teleporter`]. Trials run
//! one after another; the first failure aborts the run.

use std::io::Write;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument};

use teleport_sim::SimResult;

use crate::config::ExperimentConfig;
use crate::error::DriverResult;
use crate::operations::Teleporter;
use crate::report::{Phase, TrialOutcome, write_banner, write_trial};

/// Rounds per phase, independent of outcomes.
pub const TRIALS_PER_PHASE: usize = 10;

/// Tally for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseSummary {
    pub phase: Phase,
    pub trials: usize,
    pub successes: usize,
}

/// Tally for a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExperimentSummary {
    pub phases: Vec<PhaseSummary>,
}

impl ExperimentSummary {
    pub fn total_trials(&self) -> usize {
        self.phases.iter().map(|p| p.trials).sum()
    }

    pub fn total_successes(&self) -> usize {
        self.phases.iter().map(|p| p.successes).sum()
    }

    /// Whether every trial in every phase reproduced its input.
    pub fn all_succeeded(&self) -> bool {
        self.total_trials() == self.total_successes()
    }
}

fn teleport_once<T: Teleporter + ?Sized>(
    teleporter: &mut T,
    phase: Phase,
    sent: bool,
) -> SimResult<bool> {
    match phase {
        Phase::Classical => teleporter.teleport_classical(sent),
        Phase::Nonclassical => teleporter.teleport_nonclassical(sent),
    }
}

/// Run one phase: banner, then [`TRIALS_PER_PHASE`] sample-and-compare rounds.
#[instrument(level = "info", skip_all, fields(%phase))]
pub fn run_phase<T, R, W>(
    teleporter: &mut T,
    phase: Phase,
    rng: &mut R,
    out: &mut W,
) -> DriverResult<PhaseSummary>
where
    T: Teleporter + ?Sized,
    R: Rng,
    W: Write + ?Sized,
{
    write_banner(out, phase)?;

    let mut successes = 0;
    for round in 0..TRIALS_PER_PHASE {
        let sent = rng.gen_bool(0.5);
        let received = teleport_once(teleporter, phase, sent)?;
        let trial = TrialOutcome {
            round,
            sent,
            received,
        };
        debug!(round, sent, received, "trial complete");
        write_trial(out, phase, &trial)?;
        if trial.succeeded() {
            successes += 1;
        }
    }

    Ok(PhaseSummary {
        phase,
        trials: TRIALS_PER_PHASE,
        successes,
    })
}

/// Run both phases against `teleporter`, writing the report to `out`.
pub fn run_experiments<T, R, W>(
    teleporter: &mut T,
    rng: &mut R,
    out: &mut W,
) -> DriverResult<ExperimentSummary>
where
    T: Teleporter + ?Sized,
    R: Rng,
    W: Write + ?Sized,
{
    let mut summary = ExperimentSummary::default();
    for phase in Phase::ALL {
        let tally = run_phase(teleporter, phase, rng, out)?;
        info!(
            %phase,
            successes = tally.successes,
            trials = tally.trials,
            "phase finished"
        );
        summary.phases.push(tally);
    }
    out.flush()?;
    Ok(summary)
}

/// Acquire a teleporter, run both phases on it, and release it.
///
/// `acquire` is called exactly once. The teleporter is dropped exactly once
/// when this returns, whether the run completed or a trial failed.
pub fn run_scoped<T, F, R, W>(
    acquire: F,
    rng: &mut R,
    out: &mut W,
) -> DriverResult<ExperimentSummary>
where
    T: Teleporter,
    F: FnOnce() -> SimResult<T>,
    R: Rng,
    W: Write + ?Sized,
{
    let mut teleporter = acquire()?;
    run_experiments(&mut teleporter, rng, out)
}

/// Run both phases on a simulator built from `config`.
pub fn run<W: Write + ?Sized>(
    config: &ExperimentConfig,
    out: &mut W,
) -> DriverResult<ExperimentSummary> {
    config.validate()?;
    let mut rng = config.driver_rng();
    debug!(
        seed = ?config.seed,
        max_qubits = config.max_qubits,
        "starting experiments"
    );
    run_scoped(|| Ok(config.simulator()), &mut rng, out)
}
