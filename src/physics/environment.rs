use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Air and gravity constants, fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub air_density: f64,      // kg/m³
    pub gravity: f64,          // m/s²
    pub drag_coefficient: f64, // C_D
    pub magnus_factor: f64,    // alpha_CL
}

impl Environment {
    pub fn new(air_density: f64, gravity: f64, drag_coefficient: f64, magnus_factor: f64) -> Self {
        Environment {
            air_density,
            gravity,
            drag_coefficient,
            magnus_factor,
        }
    }

    /// Gravity only, no aerodynamic forces.
    pub fn vacuum(gravity: f64) -> Self {
        Environment::new(RHO_AIR, gravity, 0.0, 0.0)
    }

    /// Dynamic pressure 0.5 ρ V².
    pub fn dynamic_pressure(&self, speed: f64) -> f64 {
        0.5 * self.air_density * speed * speed
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(RHO_AIR, G, C_D, ALPHA_CL)
    }
}
