use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlightPhase {
    Integrating,
    GroundImpact,
    HorizonExhausted,
}

impl FlightPhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FlightPhase::Integrating)
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlightPhase::Integrating => write!(f, "Integrating"),
            FlightPhase::GroundImpact => write!(f, "Ground Impact"),
            FlightPhase::HorizonExhausted => write!(f, "Horizon Exhausted"),
        }
    }
}
