pub mod dormand_prince;
pub mod rk4;

use crate::errors::IntegrationError;
use std::ops::{Add, ControlFlow, Mul, Sub};

pub use dormand_prince::{DormandPrince, Tolerances};
pub use rk4::RK4;

/// Vector-space state the integrators can combine and measure.
pub trait StateVector:
    Clone + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    fn components(&self) -> Vec<f64>;

    fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }
}

/// Integrates from `report_times[0]` to the last report time, handing the
/// state at every report time to `observer` in order. The observer may stop
/// the integration early by returning `ControlFlow::Break`.
pub trait Propagator {
    type State;

    fn propagate<F>(
        &self,
        initial: &Self::State,
        report_times: &[f64],
        observer: F,
    ) -> Result<(), IntegrationError>
    where
        F: FnMut(f64, &Self::State) -> ControlFlow<()>;
}

pub(crate) fn check_report_times(report_times: &[f64]) -> Result<(), IntegrationError> {
    if report_times.iter().any(|t| !t.is_finite()) {
        return Err(IntegrationError::InvalidStep(
            "report times must be finite".to_string(),
        ));
    }
    if report_times.windows(2).any(|w| w[1] < w[0]) {
        return Err(IntegrationError::InvalidStep(
            "report times must be non-decreasing".to_string(),
        ));
    }
    Ok(())
}
