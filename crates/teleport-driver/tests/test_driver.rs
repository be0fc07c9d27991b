//! Tests for the experiment driver against deterministic stand-ins and the
//! real simulator.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use teleport_driver::{
    DriverError, ExperimentConfig, Phase, SUCCESS_LINE, TRIALS_PER_PHASE, Teleporter, run,
    run_experiments, run_scoped,
};
use teleport_sim::{QubitId, SimError, SimResult};

// ---------------------------------------------------------------------------
// Stand-ins
// ---------------------------------------------------------------------------

/// Returns its input, recording every call.
#[derive(Default)]
struct Identity {
    classical_calls: usize,
    nonclassical_calls: usize,
}

impl Teleporter for Identity {
    fn teleport_classical(&mut self, bit: bool) -> SimResult<bool> {
        self.classical_calls += 1;
        Ok(bit)
    }

    fn teleport_nonclassical(&mut self, positive: bool) -> SimResult<bool> {
        self.nonclassical_calls += 1;
        Ok(positive)
    }
}

/// Returns the negation of its input.
struct Inverter;

impl Teleporter for Inverter {
    fn teleport_classical(&mut self, bit: bool) -> SimResult<bool> {
        Ok(!bit)
    }

    fn teleport_nonclassical(&mut self, positive: bool) -> SimResult<bool> {
        Ok(!positive)
    }
}

/// Fails on the `fail_at`-th call and counts how often it is dropped.
struct Flaky {
    calls: usize,
    fail_at: usize,
    drops: Rc<Cell<usize>>,
}

impl Flaky {
    fn step(&mut self, value: bool) -> SimResult<bool> {
        self.calls += 1;
        if self.calls == self.fail_at {
            return Err(SimError::UnknownQubit(QubitId(self.calls)));
        }
        Ok(value)
    }
}

impl Teleporter for Flaky {
    fn teleport_classical(&mut self, bit: bool) -> SimResult<bool> {
        self.step(bit)
    }

    fn teleport_nonclassical(&mut self, positive: bool) -> SimResult<bool> {
        self.step(positive)
    }
}

impl Drop for Flaky {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

fn report_with<T: Teleporter>(teleporter: &mut T, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out: Vec<u8> = Vec::new();
    run_experiments(teleporter, &mut rng, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn round_lines(report: &str) -> Vec<&str> {
    report.lines().filter(|l| l.starts_with("Round ")).collect()
}

// ---------------------------------------------------------------------------
// Trial structure
// ---------------------------------------------------------------------------

#[test]
fn identity_succeeds_every_round() {
    let mut identity = Identity::default();
    let report = report_with(&mut identity, 1);

    assert_eq!(round_lines(&report).len(), 2 * TRIALS_PER_PHASE);
    assert_eq!(report.matches(SUCCESS_LINE).count(), 2 * TRIALS_PER_PHASE);
}

#[test]
fn exactly_ten_calls_per_phase() {
    for seed in 0..8 {
        let mut identity = Identity::default();
        report_with(&mut identity, seed);
        assert_eq!(identity.classical_calls, TRIALS_PER_PHASE);
        assert_eq!(identity.nonclassical_calls, TRIALS_PER_PHASE);
    }
}

#[test]
fn inverter_takes_blank_branch_every_round() {
    let report = report_with(&mut Inverter, 2);
    assert_eq!(report.matches(SUCCESS_LINE).count(), 0);

    let lines: Vec<&str> = report.lines().collect();
    let mut rounds = 0;
    for (i, line) in lines.iter().enumerate() {
        if line.starts_with("Round ") {
            rounds += 1;
            assert_eq!(lines[i + 1], "");
            assert_eq!(lines[i + 2], "");
        }
    }
    assert_eq!(rounds, 2 * TRIALS_PER_PHASE);
}

#[test]
fn rounds_are_numbered_per_phase() {
    let report = report_with(&mut Identity::default(), 3);
    let rounds = round_lines(&report);
    for (i, line) in rounds.iter().enumerate() {
        let expected = format!("Round {}:\t Sent ", i % TRIALS_PER_PHASE);
        assert!(line.starts_with(&expected), "{line}");
    }
}

#[test]
fn phase_labels_are_fixed() {
    let report = report_with(&mut Inverter, 4);
    let rounds = round_lines(&report);
    let (classical, nonclassical) = rounds.split_at(TRIALS_PER_PHASE);

    for line in classical {
        assert!(line.contains("Sent True") || line.contains("Sent False"));
        assert!(!line.contains("H+") && !line.contains("H-"));
    }
    for line in nonclassical {
        // The inverter always flips, so the labels must disagree.
        let sent_plus = line.contains("Sent H+");
        let received_plus = line.contains("Received H+");
        assert!(sent_plus || line.contains("Sent H-"));
        assert_ne!(sent_plus, received_plus);
    }
}

#[test]
fn summary_counts_successes() {
    let mut rng = StdRng::seed_from_u64(5);
    let summary = run_experiments(&mut Inverter, &mut rng, &mut Vec::<u8>::new()).unwrap();
    assert_eq!(summary.total_trials(), 20);
    assert_eq!(summary.total_successes(), 0);
    assert!(!summary.all_succeeded());
    assert_eq!(summary.phases[0].phase, Phase::Classical);
    assert_eq!(summary.phases[1].phase, Phase::Nonclassical);
}

// ---------------------------------------------------------------------------
// Scoped acquisition
// ---------------------------------------------------------------------------

#[test]
fn scoped_teleporter_released_once_on_success() {
    let drops = Rc::new(Cell::new(0));
    let acquisitions = Cell::new(0);
    let mut rng = StdRng::seed_from_u64(6);

    let summary = run_scoped(
        || {
            acquisitions.set(acquisitions.get() + 1);
            Ok(Flaky {
                calls: 0,
                fail_at: usize::MAX,
                drops: Rc::clone(&drops),
            })
        },
        &mut rng,
        &mut Vec::<u8>::new(),
    )
    .unwrap();

    assert!(summary.all_succeeded());
    assert_eq!(acquisitions.get(), 1);
    assert_eq!(drops.get(), 1);
}

#[test]
fn scoped_teleporter_released_once_on_failure() {
    let drops = Rc::new(Cell::new(0));
    let mut rng = StdRng::seed_from_u64(7);
    let mut out: Vec<u8> = Vec::new();

    let result = run_scoped(
        || {
            Ok(Flaky {
                calls: 0,
                fail_at: 14,
                drops: Rc::clone(&drops),
            })
        },
        &mut rng,
        &mut out,
    );

    assert!(matches!(result, Err(DriverError::Simulation(_))));
    assert_eq!(drops.get(), 1);

    // Ten classical rounds plus three non-classical rounds made it out.
    let report = String::from_utf8(out).unwrap();
    assert_eq!(round_lines(&report).len(), 13);
}

#[test]
fn failed_acquisition_runs_nothing() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut out: Vec<u8> = Vec::new();
    let result = run_scoped(
        || -> SimResult<Identity> { Err(SimError::QubitLimitExceeded { max: 0 }) },
        &mut rng,
        &mut out,
    );
    assert!(matches!(result, Err(DriverError::Simulation(_))));
    assert!(out.is_empty());
}

// ---------------------------------------------------------------------------
// Real simulator
// ---------------------------------------------------------------------------

#[test]
fn invalid_config_is_rejected_before_output() {
    let config = ExperimentConfig {
        seed: Some(1),
        max_qubits: 1,
    };
    let mut out: Vec<u8> = Vec::new();
    assert!(matches!(
        run(&config, &mut out),
        Err(DriverError::Configuration(_))
    ));
    assert!(out.is_empty());
}

#[test]
fn seeded_runs_are_reproducible() {
    let config = ExperimentConfig::seeded(2024);
    let mut first = Vec::new();
    let mut second = Vec::new();
    run(&config, &mut first).unwrap();
    run(&config, &mut second).unwrap();
    assert_eq!(first, second);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn simulator_teleports_every_round(seed in any::<u64>()) {
        let mut out: Vec<u8> = Vec::new();
        let summary = run(&ExperimentConfig::seeded(seed), &mut out).unwrap();
        prop_assert!(summary.all_succeeded());

        let report = String::from_utf8(out).unwrap();
        prop_assert_eq!(report.matches(SUCCESS_LINE).count(), 2 * TRIALS_PER_PHASE);
    }
}
