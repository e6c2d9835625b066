use super::{check_report_times, Propagator, StateVector};
use crate::constants::DEFAULT_MAX_STEPS;
use crate::errors::IntegrationError;
use crate::physics::dynamics::EquationsOfMotion;
use std::ops::ControlFlow;

/// Classical fixed-step Runge-Kutta. `dt` is an upper bound: the interval
/// between two report times is split into equal sub-steps no longer than it.
pub struct RK4<T: EquationsOfMotion> {
    eom: T,
    dt: f64,
    max_steps: usize,
}

impl<T: EquationsOfMotion> RK4<T>
where
    T::State: StateVector,
{
    pub fn new(eom: T, dt: f64) -> Self {
        RK4 {
            eom,
            dt,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn integrate(&self, state: &T::State, dt: f64) -> T::State {
        let k1 = self.eom.compute_derivative(state);

        let state2 = state.clone() + k1.clone() * (dt / 2.0);
        let k2 = self.eom.compute_derivative(&state2);

        let state3 = state.clone() + k2.clone() * (dt / 2.0);
        let k3 = self.eom.compute_derivative(&state3);

        let state4 = state.clone() + k3.clone() * dt;
        let k4 = self.eom.compute_derivative(&state4);

        state.clone() + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
    }
}

impl<T: EquationsOfMotion> Propagator for RK4<T>
where
    T::State: StateVector,
{
    type State = T::State;

    fn propagate<F>(
        &self,
        initial: &T::State,
        report_times: &[f64],
        mut observer: F,
    ) -> Result<(), IntegrationError>
    where
        F: FnMut(f64, &T::State) -> ControlFlow<()>,
    {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(IntegrationError::InvalidStep(format!(
                "fixed step must be positive, got {}",
                self.dt
            )));
        }
        check_report_times(report_times)?;

        let Some((&t0, rest)) = report_times.split_first() else {
            return Ok(());
        };

        let mut state = initial.clone();
        if observer(t0, &state).is_break() {
            return Ok(());
        }

        let t_end = report_times[report_times.len() - 1];
        let mut t = t0;
        let mut steps = 0usize;
        for &t_report in rest {
            let span = t_report - t;
            if span > 0.0 {
                // Counted in f64 so a tiny dt cannot saturate the cast.
                let needed = (span / self.dt).ceil().max(1.0);
                if steps as f64 + needed > self.max_steps as f64 {
                    return Err(IntegrationError::MaxStepsExceeded {
                        max_steps: self.max_steps,
                        t,
                        t_end,
                    });
                }
                let substeps = needed as usize;
                steps += substeps;
                let h = span / substeps as f64;
                for _ in 0..substeps {
                    state = self.integrate(&state, h);
                }
                if !state.is_finite() {
                    return Err(IntegrationError::NonFiniteState { t: t_report });
                }
            }
            t = t_report;

            if observer(t, &state).is_break() {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlightState;
    use approx::assert_abs_diff_eq;

    /// Harmonic oscillator x'' = -x packed into the flight state layout.
    struct Oscillator;

    impl EquationsOfMotion for Oscillator {
        type State = FlightState;

        fn compute_derivative(&self, state: &FlightState) -> FlightState {
            FlightState {
                position: state.velocity,
                velocity: -state.position,
            }
        }
    }

    #[test]
    fn test_oscillator_quarter_period() {
        let rk4 = RK4::new(Oscillator, 1e-3);
        let times = [0.0, std::f64::consts::FRAC_PI_2];
        let mut last = FlightState::zero();
        rk4.propagate(&FlightState::new(1.0, 0.0, 0.0, 1.0), &times, |_, s| {
            last = *s;
            ControlFlow::Continue(())
        })
        .unwrap();

        assert_abs_diff_eq!(last.position.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(last.position.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(last.velocity.x, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reports_every_time_and_stops_on_break() {
        let rk4 = RK4::new(Oscillator, 0.01);
        let times: Vec<f64> = (0..10).map(|i| i as f64 * 0.1).collect();
        let mut seen = Vec::new();
        rk4.propagate(&FlightState::new(1.0, 0.0, 0.0, 0.0), &times, |t, _| {
            seen.push(t);
            if seen.len() == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(seen, vec![0.0, 0.1, 0.2, 0.30000000000000004]);
    }

    #[test]
    fn test_step_budget_is_enforced() {
        let times = [0.0, 0.01, 0.02];
        let tiny = RK4::new(Oscillator, 1e-300).propagate(
            &FlightState::new(1.0, 0.0, 0.0, 0.0),
            &times,
            |_, _| ControlFlow::Continue(()),
        );
        assert!(matches!(
            tiny,
            Err(IntegrationError::MaxStepsExceeded { max_steps: DEFAULT_MAX_STEPS, .. })
        ));

        // 0.02 s at dt = 1e-3 needs 20 steps in total
        let mut seen = 0;
        let capped = RK4::new(Oscillator, 1e-3).with_max_steps(15).propagate(
            &FlightState::new(1.0, 0.0, 0.0, 0.0),
            &times,
            |_, _| {
                seen += 1;
                ControlFlow::Continue(())
            },
        );
        assert!(matches!(
            capped,
            Err(IntegrationError::MaxStepsExceeded { max_steps: 15, .. })
        ));
        assert_eq!(seen, 2);

        let enough = RK4::new(Oscillator, 1e-3).with_max_steps(20).propagate(
            &FlightState::new(1.0, 0.0, 0.0, 0.0),
            &times,
            |_, _| ControlFlow::Continue(()),
        );
        assert!(enough.is_ok());
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let rk4 = RK4::new(Oscillator, 0.0);
        let result = rk4.propagate(&FlightState::zero(), &[0.0, 1.0], |_, _| {
            ControlFlow::Continue(())
        });
        assert!(matches!(result, Err(IntegrationError::InvalidStep(_))));
    }
}
