use super::trajectory::{Trajectory, TrajectoryPoint};
use crate::constants::MAX_SAMPLES;
use crate::errors::FlightError;
use crate::fsm::{FlightMonitor, FlightPhase};
use crate::integrators::{DormandPrince, Propagator, Tolerances, RK4};
use crate::models::{BallProperties, FlightState};
use crate::physics::drag::drag_force_magnitude;
use crate::physics::dynamics::FlightDynamics;
use crate::physics::energy::mechanical_energy;
use crate::physics::environment::Environment;
use crate::physics::launch::LaunchResult;
use crate::physics::magnus::magnus_force_magnitude;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    pub angle_deg: f64, // above horizontal
    pub height: f64,    // m
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolverKind {
    Adaptive {
        tolerances: Tolerances,
        max_steps: usize,
    },
    FixedStep {
        dt: f64,
        max_steps: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightSettings {
    pub horizon: f64, // s
    pub samples: usize,
    pub solver: SolverKind,
}

/// `samples` evenly spaced times from 0 to `horizon`, both ends included.
pub fn report_times(horizon: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let last = (n - 1) as f64;
            (0..n).map(|i| horizon * i as f64 / last).collect()
        }
    }
}

pub fn initial_state(launch: &LaunchResult, conditions: &LaunchConditions) -> FlightState {
    let (vx, vy) = launch.velocity_components(conditions.angle_deg);
    FlightState::new(0.0, conditions.height, vx, vy)
}

pub struct FlightSimulator<T: BallProperties + Clone> {
    ball: T,
    environment: Environment,
    settings: FlightSettings,
}

impl<T: BallProperties + Clone> FlightSimulator<T> {
    pub fn new(ball: T, environment: Environment, settings: FlightSettings) -> Self {
        Self {
            ball,
            environment,
            settings,
        }
    }

    fn validate(&self, conditions: &LaunchConditions) -> Result<(), FlightError> {
        let horizon = self.settings.horizon;
        if !(horizon > 0.0 && horizon.is_finite()) {
            return Err(FlightError::InvalidParameter(format!(
                "time horizon must be positive, got {}",
                horizon
            )));
        }
        if self.settings.samples > MAX_SAMPLES {
            return Err(FlightError::InvalidParameter(format!(
                "at most {} report samples allowed, got {}",
                MAX_SAMPLES, self.settings.samples
            )));
        }
        if self.settings.samples < 2 {
            return Err(FlightError::InvalidParameter(format!(
                "need at least 2 report samples, got {}",
                self.settings.samples
            )));
        }
        if !conditions.angle_deg.is_finite() {
            return Err(FlightError::InvalidParameter(
                "launch angle must be finite".to_string(),
            ));
        }
        if !(conditions.height >= 0.0 && conditions.height.is_finite()) {
            return Err(FlightError::InvalidParameter(format!(
                "launch height must be at or above ground, got {}",
                conditions.height
            )));
        }
        Ok(())
    }

    fn sample(&self, t: f64, state: &FlightState, spin_rate: f64) -> TrajectoryPoint {
        let speed = state.speed();
        let drag_force = if speed == 0.0 {
            0.0
        } else {
            drag_force_magnitude(&self.ball, &self.environment, speed)
        };

        TrajectoryPoint {
            t,
            x: state.position.x,
            y: state.position.y,
            vx: state.velocity.x,
            vy: state.velocity.y,
            speed,
            drag_force,
            magnus_force: magnus_force_magnitude(&self.ball, &self.environment, spin_rate, speed),
            energy: mechanical_energy(&self.ball, state, self.environment.gravity),
        }
    }

    /// Flies the ball from launch until the first report sample below ground.
    ///
    /// Returns `InconclusiveTrajectory` (carrying every sample) when the
    /// horizon ends with the ball still airborne.
    pub fn fly(
        &self,
        launch: &LaunchResult,
        conditions: &LaunchConditions,
    ) -> Result<Trajectory, FlightError> {
        self.validate(conditions)?;

        let times = report_times(self.settings.horizon, self.settings.samples);
        let initial = initial_state(launch, conditions);
        let dynamics =
            FlightDynamics::new(self.ball.clone(), self.environment, launch.spin_rate);

        let mut monitor = FlightMonitor::new();
        let mut points = Vec::with_capacity(times.len());
        let observer = |t: f64, state: &FlightState| {
            points.push(self.sample(t, state, launch.spin_rate));
            match monitor.evaluate_transition(t, state) {
                FlightPhase::Integrating => ControlFlow::Continue(()),
                _ => ControlFlow::Break(()),
            }
        };

        match self.settings.solver {
            SolverKind::Adaptive {
                tolerances,
                max_steps,
            } => DormandPrince::new(dynamics, tolerances)
                .with_max_steps(max_steps)
                .propagate(&initial, &times, observer)?,
            SolverKind::FixedStep { dt, max_steps } => RK4::new(dynamics, dt)
                .with_max_steps(max_steps)
                .propagate(&initial, &times, observer)?,
        }

        let phase = match monitor.get_current_phase() {
            FlightPhase::Integrating => monitor.horizon_reached(),
            phase => phase,
        };

        let trajectory = Trajectory::new(points, phase);
        if phase == FlightPhase::HorizonExhausted {
            let final_height = trajectory.last().map_or(conditions.height, |p| p.y);
            return Err(FlightError::InconclusiveTrajectory {
                horizon: self.settings.horizon,
                final_height,
                trajectory: Box::new(trajectory),
            });
        }

        Ok(trajectory)
    }
}
