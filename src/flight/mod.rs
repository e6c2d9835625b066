pub mod simulator;
pub mod trajectory;

pub use simulator::{
    initial_state, report_times, FlightSettings, FlightSimulator, LaunchConditions, SolverKind,
};
pub use trajectory::{LandingEstimate, Trajectory, TrajectoryPoint, TrajectorySummary};
