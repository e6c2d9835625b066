use super::presets::{FtcArtifact, FtcFlywheel};
use crate::constants::*;
use crate::errors::ConfigError;
use crate::flight::{FlightSettings, LaunchConditions, SolverKind};
use crate::integrators::Tolerances;
use crate::models::{BallSpec, WheelSpec};
use crate::physics::environment::Environment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverChoice {
    Adaptive,
    FixedStep,
}

/// Every scalar a run needs, in SI units except the launch angle (degrees).
/// Missing fields in a JSON document fall back to the FTC Artifact scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // Environment
    pub air_density: f64,
    pub gravity: f64,
    pub drag_coefficient: f64,
    pub magnus_factor: f64,

    // Ball
    pub ball_mass: f64,
    pub ball_radius: f64,
    pub inertia_factor: f64,

    // Wheel
    pub wheel_radius: f64,
    pub wheel_mass: f64,
    pub wheel_angular_speed: f64,

    // Launch
    pub launch_angle_deg: f64,
    pub launch_height: f64,

    // Integration
    pub horizon: f64,
    pub samples: usize,
    pub solver: SolverChoice,
    pub rtol: f64,
    pub atol: f64,
    pub max_steps: usize,
    pub fixed_dt: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            air_density: RHO_AIR,
            gravity: G,
            drag_coefficient: C_D,
            magnus_factor: ALPHA_CL,
            ball_mass: FtcArtifact::MASS,
            ball_radius: FtcArtifact::RADIUS,
            inertia_factor: FtcArtifact::INERTIA_FACTOR,
            wheel_radius: FtcFlywheel::RADIUS,
            wheel_mass: FtcFlywheel::MASS,
            wheel_angular_speed: FtcFlywheel::ANGULAR_SPEED,
            launch_angle_deg: 45.0,
            launch_height: 0.17272, // m, 6.8 in
            horizon: 5.0,
            samples: 500,
            solver: SolverChoice::Adaptive,
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
            max_steps: DEFAULT_MAX_STEPS,
            fixed_dt: DEFAULT_FIXED_DT,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks the integration and launch settings. Physical plausibility of
    /// the ball and wheel is left to the launch model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("air_density", self.air_density),
            ("gravity", self.gravity),
            ("drag_coefficient", self.drag_coefficient),
            ("magnus_factor", self.magnus_factor),
            ("ball_mass", self.ball_mass),
            ("ball_radius", self.ball_radius),
            ("inertia_factor", self.inertia_factor),
            ("wheel_radius", self.wheel_radius),
            ("wheel_mass", self.wheel_mass),
            ("wheel_angular_speed", self.wheel_angular_speed),
            ("launch_angle_deg", self.launch_angle_deg),
            ("launch_height", self.launch_height),
            ("horizon", self.horizon),
            ("rtol", self.rtol),
            ("atol", self.atol),
            ("fixed_dt", self.fixed_dt),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite, got {}", name, value)));
        }

        let positive = [
            ("horizon", self.horizon),
            ("rtol", self.rtol),
            ("atol", self.atol),
            ("fixed_dt", self.fixed_dt),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
        }

        if self.launch_height < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "launch_height must not be below ground, got {}",
                self.launch_height
            )));
        }
        if self.samples < 2 {
            return Err(ConfigError::Invalid(format!(
                "samples must be at least 2, got {}",
                self.samples
            )));
        }
        if self.samples > MAX_SAMPLES {
            return Err(ConfigError::Invalid(format!(
                "samples must be at most {}, got {}",
                MAX_SAMPLES, self.samples
            )));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::Invalid("max_steps must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn ball(&self) -> BallSpec {
        BallSpec::new(self.ball_mass, self.ball_radius, self.inertia_factor)
    }

    pub fn wheel(&self) -> WheelSpec {
        WheelSpec::new(self.wheel_radius, self.wheel_mass, self.wheel_angular_speed)
    }

    pub fn environment(&self) -> Environment {
        Environment::new(
            self.air_density,
            self.gravity,
            self.drag_coefficient,
            self.magnus_factor,
        )
    }

    pub fn launch_conditions(&self) -> LaunchConditions {
        LaunchConditions {
            angle_deg: self.launch_angle_deg,
            height: self.launch_height,
        }
    }

    pub fn flight_settings(&self) -> FlightSettings {
        let solver = match self.solver {
            SolverChoice::Adaptive => SolverKind::Adaptive {
                tolerances: Tolerances {
                    rtol: self.rtol,
                    atol: self.atol,
                },
                max_steps: self.max_steps,
            },
            SolverChoice::FixedStep => SolverKind::FixedStep {
                dt: self.fixed_dt,
                max_steps: self.max_steps,
            },
        };
        FlightSettings {
            horizon: self.horizon,
            samples: self.samples,
            solver,
        }
    }
}
