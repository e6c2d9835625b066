use nalgebra as na;

/// Uniform field pointing down the height axis.
pub fn gravity_acceleration(g: f64) -> na::Vector2<f64> {
    na::Vector2::new(0.0, -g)
}
