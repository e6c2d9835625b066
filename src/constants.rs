// Environmental constants
pub const RHO_AIR: f64 = 1.225; // Air density at sea level (kg/m³)
pub const G: f64 = 9.81; // Gravitational acceleration (m/s²)

// Aerodynamic coefficients
pub const C_D: f64 = 0.50; // Drag coefficient of the ball (estimate)
pub const ALPHA_CL: f64 = 0.2; // Magnus factor for C_L = ALPHA_CL * S (tunable, not derived)

// Wheel geometry
pub const DISK_INERTIA_FACTOR: f64 = 0.5; // I = 0.5 m R² for a solid disk

// Solver defaults
pub const DEFAULT_RTOL: f64 = 1e-6;
pub const DEFAULT_ATOL: f64 = 1e-8;
pub const DEFAULT_MAX_STEPS: usize = 100_000;
pub const MAX_SAMPLES: usize = 1_000_000;
pub const DEFAULT_FIXED_DT: f64 = 0.01; // seconds

// Math
pub const PI: f64 = std::f64::consts::PI;
pub const RAD_S_TO_RPM: f64 = 60.0 / (2.0 * PI);
