pub mod ball;
pub mod state;
pub mod wheel;

pub use ball::{BallProperties, BallSpec};
pub use state::FlightState;
pub use wheel::WheelSpec;
