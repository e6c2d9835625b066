use crate::integrators::StateVector;
use nalgebra as na;

/// Planar flight state `[x, y, Vx, Vy]`, also used for its time derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub position: na::Vector2<f64>, // x horizontal, y height (m)
    pub velocity: na::Vector2<f64>, // m/s
}

impl FlightState {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self {
            position: na::Vector2::new(x, y),
            velocity: na::Vector2::new(vx, vy),
        }
    }

    pub fn zero() -> Self {
        Self {
            position: na::Vector2::zeros(),
            velocity: na::Vector2::zeros(),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn height(&self) -> f64 {
        self.position.y
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

impl std::ops::Add for FlightState {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        FlightState {
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
        }
    }
}

impl std::ops::Sub for FlightState {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        FlightState {
            position: self.position - other.position,
            velocity: self.velocity - other.velocity,
        }
    }
}

impl std::ops::Mul<f64> for FlightState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        FlightState {
            position: self.position * scalar,
            velocity: self.velocity * scalar,
        }
    }
}

impl StateVector for FlightState {
    fn components(&self) -> Vec<f64> {
        vec![
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_combination() {
        let a = FlightState::new(1.0, 2.0, 3.0, 4.0);
        let b = FlightState::new(0.5, -1.0, 0.0, 2.0);
        let c = a + b * 2.0 - a;
        assert_eq!(c, FlightState::new(1.0, -2.0, 0.0, 4.0));
    }

    #[test]
    fn test_components_order() {
        let s = FlightState::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(s.components(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.speed(), 5.0);
        assert!(s.is_finite());
        assert!(!FlightState::new(f64::NAN, 0.0, 0.0, 0.0).is_finite());
    }
}
