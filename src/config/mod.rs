pub mod presets;
pub mod simulation;

pub use simulation::{SimulationConfig, SolverChoice};
