//! Magnus lift on a ball spinning about an axis normal to the flight plane.
//!
//! The lift coefficient is the linear approximation `C_L = alpha_CL * S`,
//! with `S = omega * r / V` the spin parameter. `alpha_CL` is a tuning
//! constant; the curve is not fitted to measured lift data.

use super::environment::Environment;
use crate::models::BallProperties;
use nalgebra as na;

pub fn spin_parameter(spin_rate: f64, radius: f64, speed: f64) -> f64 {
    spin_rate * radius / speed
}

pub fn lift_coefficient(env: &Environment, spin_parameter: f64) -> f64 {
    env.magnus_factor * spin_parameter
}

/// Magnitude of the Magnus force at `speed`. Zero when the ball is stationary.
pub fn magnus_force_magnitude<T: BallProperties>(
    ball: &T,
    env: &Environment,
    spin_rate: f64,
    speed: f64,
) -> f64 {
    if speed == 0.0 {
        return 0.0;
    }
    let c_l = lift_coefficient(env, spin_parameter(spin_rate, ball.radius(), speed));
    env.dynamic_pressure(speed) * ball.reference_area() * c_l
}

/// Lift acceleration along `(-Vy, Vx) / V`, i.e. the velocity rotated a
/// quarter turn counter-clockwise. Positive spin (backspin for a ball moving
/// in +x) lifts the ball.
pub fn magnus_acceleration<T: BallProperties>(
    ball: &T,
    env: &Environment,
    spin_rate: f64,
    velocity: &na::Vector2<f64>,
) -> na::Vector2<f64> {
    let v = velocity.magnitude();
    if v == 0.0 {
        return na::Vector2::zeros();
    }

    let magnitude = magnus_force_magnitude(ball, env, spin_rate, v) / ball.mass();
    na::Vector2::new(-velocity.y, velocity.x) / v * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets::FtcArtifact;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use test_case::test_case;

    #[test_case(na::Vector2::new(5.0, 0.0), na::Vector2::new(0.0, 1.0); "horizontal flight lifts")]
    #[test_case(na::Vector2::new(0.0, 5.0), na::Vector2::new(-1.0, 0.0); "rising flight pushes back")]
    #[test_case(na::Vector2::new(-5.0, 0.0), na::Vector2::new(0.0, -1.0); "reverse flight pushes down")]
    fn test_magnus_direction(velocity: na::Vector2<f64>, direction: na::Vector2<f64>) {
        let a = magnus_acceleration(&FtcArtifact, &Environment::default(), 240.0, &velocity);
        assert_abs_diff_eq!(a.normalize(), direction, epsilon = 1e-12);
        assert_abs_diff_eq!(a.dot(&velocity), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lift_is_linear_in_speed() {
        // C_L ~ 1/V cancels one power of V in the dynamic pressure.
        let env = Environment::default();
        let slow = magnus_force_magnitude(&FtcArtifact, &env, 240.0, 2.0);
        let fast = magnus_force_magnitude(&FtcArtifact, &env, 240.0, 6.0);
        assert_relative_eq!(fast / slow, 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_spin_parameter() {
        assert_relative_eq!(spin_parameter(241.64, 0.0635, 6.1377), 2.5, epsilon = 1e-3);
    }

    #[test]
    fn test_no_spin_no_lift() {
        let a = magnus_acceleration(
            &FtcArtifact,
            &Environment::default(),
            0.0,
            &na::Vector2::new(4.0, 3.0),
        );
        assert_eq!(a, na::Vector2::zeros());
    }
}
