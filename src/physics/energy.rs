use super::launch::LaunchResult;
use crate::models::{BallProperties, FlightState, WheelSpec};

/// Translational plus rotational kinetic energy of the ball after launch.
pub fn ball_kinetic_energy<T: BallProperties>(ball: &T, launch: &LaunchResult) -> f64 {
    let translational = 0.5 * ball.mass() * launch.exit_speed.powi(2);
    let rotational = 0.5 * ball.moment_of_inertia() * launch.spin_rate.powi(2);
    translational + rotational
}

/// Rotational energy stored in the wheel before contact.
pub fn wheel_kinetic_energy(wheel: &WheelSpec) -> f64 {
    0.5 * wheel.moment_of_inertia() * wheel.angular_speed.powi(2)
}

/// Fraction of the wheel's energy that ends up in the ball.
pub fn transfer_efficiency<T: BallProperties>(
    ball: &T,
    wheel: &WheelSpec,
    launch: &LaunchResult,
) -> f64 {
    ball_kinetic_energy(ball, launch) / wheel_kinetic_energy(wheel)
}

/// Translational kinetic plus potential energy of the ball in flight,
/// measured from ground level. Spin energy is constant and left out.
pub fn mechanical_energy<T: BallProperties>(ball: &T, state: &FlightState, gravity: f64) -> f64 {
    let v = state.speed();
    0.5 * ball.mass() * v * v + ball.mass() * gravity * state.height()
}
