//! Teleport Command-Line Interface
//!
//! Runs the two quantum-teleportation experiments (classical bits, then the
//! H+/H- superposition states) on a local statevector simulator and prints a
//! report for every round.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io::{self, Write};

use clap::Parser;
use console::style;
use tracing::info;
use tracing_subscriber::EnvFilter;

use teleport_driver::ExperimentConfig;
use teleport_sim::DEFAULT_MAX_QUBITS;

/// Teleport - quantum teleportation experiments on a local simulator
#[derive(Parser)]
#[command(name = "teleport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Seed for the sent values and measurement draws (random if omitted)
    #[arg(long, env = "TELEPORT_SEED")]
    seed: Option<u64>,

    /// Maximum number of simultaneously allocated qubits
    #[arg(long, env = "TELEPORT_MAX_QUBITS", default_value_t = DEFAULT_MAX_QUBITS)]
    max_qubits: usize,
}

impl Cli {
    fn config(&self) -> ExperimentConfig {
        ExperimentConfig {
            seed: self.seed,
            max_qubits: self.max_qubits,
        }
    }
}

fn execute(config: &ExperimentConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = teleport_driver::run(config, &mut out)?;
    out.flush()?;

    info!(
        successes = summary.total_successes(),
        trials = summary.total_trials(),
        "experiments finished"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = execute(&cli.config()) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
