use crate::constants::{DISK_INERTIA_FACTOR, RAD_S_TO_RPM};
use serde::{Deserialize, Serialize};

/// Launcher wheel, modelled as a solid disk spinning at `angular_speed`
/// just before contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelSpec {
    pub radius: f64,        // m
    pub mass: f64,          // kg
    pub angular_speed: f64, // rad/s
}

impl WheelSpec {
    pub fn new(radius: f64, mass: f64, angular_speed: f64) -> Self {
        Self {
            radius,
            mass,
            angular_speed,
        }
    }

    pub fn moment_of_inertia(&self) -> f64 {
        DISK_INERTIA_FACTOR * self.mass * self.radius.powi(2)
    }

    pub fn surface_speed(&self) -> f64 {
        self.angular_speed * self.radius
    }

    pub fn rpm(&self) -> f64 {
        self.angular_speed * RAD_S_TO_RPM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solid_disk_inertia() {
        let wheel = WheelSpec::new(0.048, 0.106, 628.0);
        assert_relative_eq!(wheel.moment_of_inertia(), 1.22112e-4, max_relative = 1e-12);
    }

    #[test]
    fn test_surface_speed_and_rpm() {
        let wheel = WheelSpec::new(0.05, 0.1, 100.0);
        assert_relative_eq!(wheel.surface_speed(), 5.0);
        assert_relative_eq!(wheel.rpm(), 954.929_658_551_372, epsilon = 1e-9);
    }
}
