use super::environment::Environment;
use crate::models::BallProperties;
use nalgebra as na;

pub fn drag_force_magnitude<T: BallProperties>(ball: &T, env: &Environment, speed: f64) -> f64 {
    env.dynamic_pressure(speed) * ball.reference_area() * env.drag_coefficient
}

/// Quadratic drag opposing the velocity. Zero for a stationary ball.
pub fn drag_acceleration<T: BallProperties>(
    ball: &T,
    env: &Environment,
    velocity: &na::Vector2<f64>,
) -> na::Vector2<f64> {
    let v = velocity.magnitude();
    if v == 0.0 {
        return na::Vector2::zeros();
    }

    let magnitude = drag_force_magnitude(ball, env, v) / ball.mass();
    -(velocity / v) * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets::FtcArtifact;
    use approx::assert_relative_eq;

    #[test]
    fn test_drag_opposes_velocity() {
        let env = Environment::default();
        let velocity = na::Vector2::new(3.0, -4.0);
        let a = drag_acceleration(&FtcArtifact, &env, &velocity);

        let expected =
            0.5 * 1.225 * 25.0 * FtcArtifact.reference_area() * 0.5 / FtcArtifact::MASS;
        assert_relative_eq!(a.magnitude(), expected, max_relative = 1e-12);
        assert_relative_eq!(a.normalize().dot(&velocity.normalize()), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_drag_scales_with_speed_squared() {
        let env = Environment::default();
        let slow = drag_force_magnitude(&FtcArtifact, &env, 2.0);
        let fast = drag_force_magnitude(&FtcArtifact, &env, 6.0);
        assert_relative_eq!(fast / slow, 9.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_velocity_has_no_drag() {
        let a = drag_acceleration(&FtcArtifact, &Environment::default(), &na::Vector2::zeros());
        assert_eq!(a, na::Vector2::zeros());
    }
}
