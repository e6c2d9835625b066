use crate::config::SimulationConfig;
use crate::errors::{FlightError, SimulationError};
use crate::flight::{FlightSimulator, Trajectory, TrajectorySummary};
use crate::models::{BallProperties, WheelSpec};
use crate::physics::energy::{ball_kinetic_energy, transfer_efficiency, wheel_kinetic_energy};
use crate::physics::launch::{solve_launch, LaunchResult};
use serde::{Deserialize, Serialize};

/// Exit conditions plus the derived quantities worth printing next to them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchReport {
    pub result: LaunchResult,
    pub wheel_surface_speed: f64,
    pub ball_surface_speed: f64,
    pub wheel_rpm: f64,
    pub spin_rpm: f64,
    pub ball_kinetic_energy: f64,
    pub wheel_kinetic_energy: f64,
    pub transfer_efficiency: f64,
}

impl LaunchReport {
    pub fn new<T: BallProperties>(ball: &T, wheel: &WheelSpec, result: LaunchResult) -> Self {
        Self {
            result,
            wheel_surface_speed: wheel.surface_speed(),
            ball_surface_speed: result.spin_rate * ball.radius(),
            wheel_rpm: wheel.rpm(),
            spin_rpm: result.spin_rpm(),
            ball_kinetic_energy: ball_kinetic_energy(ball, &result),
            wheel_kinetic_energy: wheel_kinetic_energy(wheel),
            transfer_efficiency: transfer_efficiency(ball, wheel, &result),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub launch: LaunchReport,
    pub summary: TrajectorySummary,
    pub trajectory: Trajectory,
}

/// Launch model only.
pub fn run_launch(config: &SimulationConfig) -> Result<LaunchReport, SimulationError> {
    config.validate()?;
    let ball = config.ball();
    let wheel = config.wheel();
    let result = solve_launch(&ball, &wheel)?;
    Ok(LaunchReport::new(&ball, &wheel, result))
}

/// Launch model followed by the flight integrator.
pub fn run(config: &SimulationConfig) -> Result<SimulationReport, SimulationError> {
    let launch = run_launch(config)?;

    let simulator =
        FlightSimulator::new(config.ball(), config.environment(), config.flight_settings());
    let trajectory = simulator.fly(&launch.result, &config.launch_conditions())?;

    let Some(summary) = trajectory.summary() else {
        return Err(FlightError::InvalidParameter("no report samples produced".to_string()).into());
    };

    Ok(SimulationReport {
        launch,
        summary,
        trajectory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LaunchError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_launch_report() {
        let report = run_launch(&SimulationConfig::default()).unwrap();
        assert_abs_diff_eq!(report.result.exit_speed, 6.13766, epsilon = 1e-4);
        assert_abs_diff_eq!(report.wheel_surface_speed, 30.144, epsilon = 1e-9);
        assert_abs_diff_eq!(report.ball_surface_speed, 15.344, epsilon = 1e-3);
        assert_abs_diff_eq!(report.wheel_rpm, 5996.96, epsilon = 1e-2);
        assert!(report.transfer_efficiency > 0.2 && report.transfer_efficiency < 0.21);
    }

    #[test]
    fn test_full_run() {
        let report = run(&SimulationConfig::default()).unwrap();
        assert!(report.trajectory.landed());
        assert_abs_diff_eq!(report.summary.max_height, 1.184, epsilon = 0.01);
        assert_eq!(report.summary.flight_time, report.trajectory.last().unwrap().t);
    }

    #[test]
    fn test_domain_error_surfaces() {
        let config = SimulationConfig {
            wheel_mass: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            run(&config),
            Err(SimulationError::Launch(LaunchError::Domain { .. }))
        ));
    }

    #[test]
    fn test_inconclusive_surfaces() {
        let config = SimulationConfig {
            horizon: 0.2,
            ..Default::default()
        };
        assert!(matches!(
            run(&config),
            Err(SimulationError::Flight(FlightError::InconclusiveTrajectory { .. }))
        ));
    }
}
