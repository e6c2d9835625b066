use crate::models::{BallProperties, BallSpec, WheelSpec};

/// FTC Artifact game ball: 5 in diameter, treated as a solid sphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct FtcArtifact;

impl FtcArtifact {
    pub const MASS: f64 = 0.0748; // kg
    pub const RADIUS: f64 = 0.1270 / 2.0; // meters
    pub const INERTIA_FACTOR: f64 = 0.4;

    pub fn spec() -> BallSpec {
        BallSpec::from_properties(&FtcArtifact)
    }
}

impl BallProperties for FtcArtifact {
    fn mass(&self) -> f64 {
        Self::MASS
    }

    fn radius(&self) -> f64 {
        Self::RADIUS
    }

    fn inertia_factor(&self) -> f64 {
        Self::INERTIA_FACTOR
    }
}

/// Single flywheel shooter, ≈6000 rpm before contact.
#[derive(Debug, Clone, Copy, Default)]
pub struct FtcFlywheel;

impl FtcFlywheel {
    pub const RADIUS: f64 = 0.048; // meters
    pub const MASS: f64 = 0.106; // kg
    pub const ANGULAR_SPEED: f64 = 628.0; // rad/s

    pub fn spec() -> WheelSpec {
        WheelSpec::new(Self::RADIUS, Self::MASS, Self::ANGULAR_SPEED)
    }
}
