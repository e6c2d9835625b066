//! Flight of a spinning ball launched by a friction wheel.
//!
//! A closed-form impulse exchange between wheel and ball gives the exit speed
//! and spin ([`physics::launch`]); the planar flight under gravity, quadratic
//! drag and Magnus lift is then integrated until the ball crosses the ground
//! ([`flight`]).

pub mod config;
pub mod constants;
pub mod errors;
pub mod flight;
pub mod fsm;
pub mod integrators;
pub mod models;
pub mod output;
pub mod physics;
pub mod simulation;

pub use config::SimulationConfig;
pub use errors::{ConfigError, FlightError, IntegrationError, LaunchError, SimulationError};
pub use simulation::{run, run_launch, LaunchReport, SimulationReport};
