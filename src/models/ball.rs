use crate::constants::PI;
use serde::{Deserialize, Serialize};

/// Mechanical description of a launched sphere.
///
/// Only mass, radius and inertia factor are primitive; the projected area and
/// moment of inertia are always derived from them.
pub trait BallProperties {
    fn mass(&self) -> f64;
    fn radius(&self) -> f64;
    fn inertia_factor(&self) -> f64;

    fn reference_area(&self) -> f64 {
        PI * self.radius().powi(2)
    }

    fn moment_of_inertia(&self) -> f64 {
        self.inertia_factor() * self.mass() * self.radius().powi(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    pub mass: f64,           // kg
    pub radius: f64,         // m
    pub inertia_factor: f64, // k in I = k m r², 0.4 solid, 2/3 hollow
}

impl BallSpec {
    pub fn new(mass: f64, radius: f64, inertia_factor: f64) -> Self {
        Self {
            mass,
            radius,
            inertia_factor,
        }
    }

    pub fn from_properties<T: BallProperties>(ball: &T) -> Self {
        Self::new(ball.mass(), ball.radius(), ball.inertia_factor())
    }
}

impl BallProperties for BallSpec {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn inertia_factor(&self) -> f64 {
        self.inertia_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(0.0748, 0.0635, 0.4, 1.2064492e-4; "solid ftc artifact")]
    #[test_case(0.0027, 0.020, 2.0 / 3.0, 7.2e-7; "hollow table tennis ball")]
    fn test_moment_of_inertia(mass: f64, radius: f64, k: f64, expected: f64) {
        let ball = BallSpec::new(mass, radius, k);
        assert_relative_eq!(ball.moment_of_inertia(), expected, max_relative = 1e-9);
    }

    #[test]
    fn test_derived_values_follow_primitives() {
        let mut ball = BallSpec::new(0.0748, 0.0635, 0.4);
        ball.radius = 0.127;
        assert_relative_eq!(ball.reference_area(), PI * 0.127 * 0.127);
        assert_relative_eq!(ball.moment_of_inertia(), 0.4 * 0.0748 * 0.127 * 0.127);
    }
}
