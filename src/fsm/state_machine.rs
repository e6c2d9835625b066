use super::flight_states::FlightPhase;
use crate::models::FlightState;

/// Watches report samples in time order and decides when the flight is over.
pub struct FlightMonitor {
    current_phase: FlightPhase,
    samples_seen: usize,
    last_time: Option<f64>,
    phase_change_time: Option<f64>,
}

impl FlightMonitor {
    pub fn new() -> Self {
        Self {
            current_phase: FlightPhase::Integrating,
            samples_seen: 0,
            last_time: None,
            phase_change_time: None,
        }
    }

    pub fn get_current_phase(&self) -> FlightPhase {
        self.current_phase
    }

    pub fn samples_seen(&self) -> usize {
        self.samples_seen
    }

    /// Time of the sample that ended the flight, if it has ended.
    pub fn get_phase_change_time(&self) -> Option<f64> {
        self.phase_change_time
    }

    fn transition_to(&mut self, new_phase: FlightPhase, time: Option<f64>) {
        if self.current_phase != new_phase && !self.current_phase.is_terminal() {
            self.current_phase = new_phase;
            self.phase_change_time = time;
        }
    }

    /// Feeds one report sample; returns the phase after the sample.
    pub fn evaluate_transition(&mut self, time: f64, state: &FlightState) -> FlightPhase {
        if self.current_phase.is_terminal() {
            return self.current_phase;
        }

        self.samples_seen += 1;
        self.last_time = Some(time);
        if state.height() < 0.0 {
            self.transition_to(FlightPhase::GroundImpact, Some(time));
        }
        self.current_phase
    }

    /// Called once the solver has covered the whole horizon.
    pub fn horizon_reached(&mut self) -> FlightPhase {
        self.transition_to(FlightPhase::HorizonExhausted, self.last_time);
        self.current_phase
    }
}

impl Default for FlightMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_negative_height_ends_flight() {
        let mut fsm = FlightMonitor::new();
        assert_eq!(
            fsm.evaluate_transition(0.0, &FlightState::new(0.0, 0.2, 1.0, 1.0)),
            FlightPhase::Integrating
        );
        assert_eq!(
            fsm.evaluate_transition(0.1, &FlightState::new(0.1, 0.0, 1.0, -1.0)),
            FlightPhase::Integrating
        );
        assert_eq!(
            fsm.evaluate_transition(0.2, &FlightState::new(0.2, -0.1, 1.0, -1.0)),
            FlightPhase::GroundImpact
        );
        assert_eq!(fsm.get_phase_change_time(), Some(0.2));
        assert_eq!(fsm.samples_seen(), 3);
    }

    #[test]
    fn test_terminal_phase_is_sticky() {
        let mut fsm = FlightMonitor::new();
        fsm.evaluate_transition(0.0, &FlightState::new(0.0, -1.0, 0.0, 0.0));
        fsm.evaluate_transition(0.1, &FlightState::new(0.0, 5.0, 0.0, 0.0));
        assert_eq!(fsm.horizon_reached(), FlightPhase::GroundImpact);
        assert_eq!(fsm.samples_seen(), 1);
    }

    #[test]
    fn test_horizon_without_impact() {
        let mut fsm = FlightMonitor::new();
        fsm.evaluate_transition(0.0, &FlightState::new(0.0, 1.0, 0.0, 0.0));
        fsm.evaluate_transition(0.5, &FlightState::new(0.0, 2.0, 0.0, 0.0));
        assert_eq!(fsm.horizon_reached(), FlightPhase::HorizonExhausted);
        assert_eq!(fsm.get_phase_change_time(), Some(0.5));
        assert_eq!(FlightPhase::HorizonExhausted.to_string(), "Horizon Exhausted");
    }
}
