use super::drag::drag_acceleration;
use super::environment::Environment;
use super::gravity::gravity_acceleration;
use super::magnus::magnus_acceleration;
use crate::models::{BallProperties, FlightState};
use nalgebra as na;

pub trait EquationsOfMotion {
    type State;

    fn compute_derivative(&self, state: &Self::State) -> Self::State;
}

/// Point-mass flight of a spinning ball: gravity, quadratic drag and Magnus
/// lift. The spin rate is held constant for the whole flight.
#[derive(Debug, Clone)]
pub struct FlightDynamics<T: BallProperties> {
    ball: T,
    environment: Environment,
    spin_rate: f64,
}

impl<T: BallProperties> FlightDynamics<T> {
    pub fn new(ball: T, environment: Environment, spin_rate: f64) -> Self {
        Self {
            ball,
            environment,
            spin_rate,
        }
    }

    pub fn ball(&self) -> &T {
        &self.ball
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn spin_rate(&self) -> f64 {
        self.spin_rate
    }

    /// Total acceleration for a given velocity. Position does not enter the
    /// force model. At zero speed only gravity remains.
    pub fn accelerations(&self, velocity: &na::Vector2<f64>) -> na::Vector2<f64> {
        let mut acceleration = gravity_acceleration(self.environment.gravity);
        if velocity.magnitude() == 0.0 {
            return acceleration;
        }

        acceleration += drag_acceleration(&self.ball, &self.environment, velocity);
        acceleration += magnus_acceleration(&self.ball, &self.environment, self.spin_rate, velocity);
        acceleration
    }
}

impl<T: BallProperties> EquationsOfMotion for FlightDynamics<T> {
    type State = FlightState;

    fn compute_derivative(&self, state: &FlightState) -> FlightState {
        FlightState {
            position: state.velocity,
            velocity: self.accelerations(&state.velocity),
        }
    }
}
