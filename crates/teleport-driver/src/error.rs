//! Error types for the driver crate.

use thiserror::Error;

use teleport_sim::SimError;

/// Errors that can abort an experiment run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DriverError {
    /// The teleportation operation failed inside the simulator.
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimError),

    /// Writing the report failed.
    #[error("Report output failed: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid experiment configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;
