//! Friction-wheel launch as a single tangential impulse exchange.
//!
//! The wheel and the ball trade an impulse `J` at the contact point. With
//! `1/m_eff = 1/m + r_b²/I_b + R_w²/I_w`, the impulse that carries the wheel
//! surface speed is `J = ω_w0 R_w m_eff`, giving `V_b = J/m` and
//! `ω_b = J r_b / I_b`. Closed form, no iteration.

use crate::constants::RAD_S_TO_RPM;
use crate::errors::LaunchError;
use crate::models::{BallProperties, WheelSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchResult {
    pub exit_speed: f64, // V_b (m/s)
    pub spin_rate: f64,  // omega_b (rad/s)
    pub impulse: f64,    // J (N·s)
}

impl LaunchResult {
    pub fn spin_rpm(&self) -> f64 {
        self.spin_rate * RAD_S_TO_RPM
    }

    /// Launch velocity components for an elevation `angle_deg` above horizontal.
    pub fn velocity_components(&self, angle_deg: f64) -> (f64, f64) {
        let theta = angle_deg.to_radians();
        (self.exit_speed * theta.cos(), self.exit_speed * theta.sin())
    }
}

fn require_positive(quantity: &'static str, value: f64) -> Result<f64, LaunchError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(LaunchError::Domain { quantity, value })
    }
}

pub fn solve_launch<T: BallProperties>(
    ball: &T,
    wheel: &WheelSpec,
) -> Result<LaunchResult, LaunchError> {
    let m = require_positive("ball mass", ball.mass())?;
    let i_b = require_positive("ball moment of inertia", ball.moment_of_inertia())?;
    let i_w = require_positive("wheel moment of inertia", wheel.moment_of_inertia())?;
    let r_w = require_positive("wheel radius", wheel.radius)?;
    if !(wheel.angular_speed >= 0.0) {
        return Err(LaunchError::Domain {
            quantity: "wheel angular speed",
            value: wheel.angular_speed,
        });
    }
    let r_b = ball.radius();

    let denom = 1.0 / m + r_b * r_b / i_b + r_w * r_w / i_w;
    let impulse = wheel.surface_speed() / denom;

    Ok(LaunchResult {
        exit_speed: impulse / m,
        spin_rate: impulse * r_b / i_b,
        impulse,
    })
}
