use crate::flight::Trajectory;
use thiserror::Error;

/// Invalid physical configuration handed to the launch model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaunchError {
    #[error("{quantity} must be positive, got {value}")]
    Domain { quantity: &'static str, value: f64 },
}

/// The numerical solver could not produce a trustworthy solution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("step size {step:e} fell below the minimum at t={t}")]
    StepSizeTooSmall { t: f64, step: f64 },
    #[error("exceeded {max_steps} steps before reaching t={t_end} (stopped at t={t})")]
    MaxStepsExceeded { max_steps: usize, t: f64, t_end: f64 },
    #[error("state became non-finite at t={t}")]
    NonFiniteState { t: f64 },
    #[error("invalid step configuration: {0}")]
    InvalidStep(String),
}

#[derive(Debug, Error)]
pub enum FlightError {
    #[error(
        "no ground crossing within {horizon} s horizon (height {final_height:.3} m at end), extend the horizon"
    )]
    InconclusiveTrajectory {
        horizon: f64,
        final_height: f64,
        trajectory: Box<Trajectory>,
    },
    #[error("integration failed: {0}")]
    Integration(#[from] IntegrationError),
    #[error("invalid flight parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    Flight(#[from] FlightError),
}
