pub mod flight_states;
pub mod state_machine;

pub use flight_states::FlightPhase;
pub use state_machine::FlightMonitor;
