//! Dormand-Prince 5(4) with adaptive step-size control.
//!
//! Steps are accepted when the RMS of the embedded error estimate, scaled by
//! `atol + rtol * max(|y_old|, |y_new|)`, is at most one. Report times that
//! fall inside an accepted step are filled in by the fourth-order continuous
//! extension of the method, so sampling never constrains the step size.

use super::{check_report_times, Propagator, StateVector};
use crate::constants::{DEFAULT_ATOL, DEFAULT_MAX_STEPS, DEFAULT_RTOL};
use crate::errors::IntegrationError;
use crate::physics::dynamics::EquationsOfMotion;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

// Tableau rows. `EquationsOfMotion` has no explicit time, so the nodes c_i are unused.
const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights, also the last row of the tableau (FSAL).
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Difference between fifth- and fourth-order weights.
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

// Continuous extension (Hairer, Norsett & Wanner, DOPRI5).
const D1: f64 = -12715105075.0 / 11282082432.0;
const D3: f64 = 87487479700.0 / 32700410799.0;
const D4: f64 = -10690763975.0 / 1880347072.0;
const D5: f64 = 701980252875.0 / 199316789632.0;
const D6: f64 = -1453857185.0 / 822651844.0;
const D7: f64 = 69997945.0 / 29380423.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
        }
    }
}

pub struct DormandPrince<T: EquationsOfMotion> {
    eom: T,
    tolerances: Tolerances,
    max_steps: usize,
}

struct Step<S> {
    state: S,
    derivative: S,
    dense: S,
    error_norm: f64,
}

impl<T: EquationsOfMotion> DormandPrince<T>
where
    T::State: StateVector,
{
    pub fn new(eom: T, tolerances: Tolerances) -> Self {
        DormandPrince {
            eom,
            tolerances,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// RMS of `value` weighted by `atol + rtol * max(|a|, |b|)` per component.
    fn scaled_norm(&self, value: &T::State, a: &T::State, b: &T::State) -> f64 {
        let value = value.components();
        let a = a.components();
        let b = b.components();
        let n = value.len().max(1) as f64;
        let sum: f64 = value
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|(v, (a, b))| {
                let scale = self.tolerances.atol + self.tolerances.rtol * a.abs().max(b.abs());
                (v / scale).powi(2)
            })
            .sum();
        (sum / n).sqrt()
    }

    /// Starting step from the local scale of the solution and its derivatives.
    fn initial_step(&self, y0: &T::State, f0: &T::State, span: f64) -> f64 {
        let d0 = self.scaled_norm(y0, y0, y0);
        let d1 = self.scaled_norm(f0, y0, y0);
        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };
        let h0 = h0.min(span);

        let y1 = y0.clone() + f0.clone() * h0;
        let f1 = self.eom.compute_derivative(&y1);
        let d2 = self.scaled_norm(&(f1 - f0.clone()), y0, y0) / h0;

        let h1 = if d1.max(d2) <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / 5.0)
        };

        (100.0 * h0).min(h1).min(span)
    }

    fn attempt(&self, y: &T::State, k1: &T::State, h: f64) -> Step<T::State> {
        let k2 = self.eom.compute_derivative(&(y.clone() + k1.clone() * (h * A21)));
        let k3 = self
            .eom
            .compute_derivative(&(y.clone() + (k1.clone() * A31 + k2.clone() * A32) * h));
        let k4 = self.eom.compute_derivative(
            &(y.clone() + (k1.clone() * A41 + k2.clone() * A42 + k3.clone() * A43) * h),
        );
        let k5 = self.eom.compute_derivative(
            &(y.clone()
                + (k1.clone() * A51 + k2.clone() * A52 + k3.clone() * A53 + k4.clone() * A54)
                    * h),
        );
        let k6 = self.eom.compute_derivative(
            &(y.clone()
                + (k1.clone() * A61
                    + k2 * A62
                    + k3.clone() * A63
                    + k4.clone() * A64
                    + k5.clone() * A65)
                    * h),
        );

        let state = y.clone()
            + (k1.clone() * B1 + k3.clone() * B3 + k4.clone() * B4 + k5.clone() * B5 + k6.clone() * B6)
                * h;
        let k7 = self.eom.compute_derivative(&state);

        let dense = (k1.clone() * D1
            + k3.clone() * D3
            + k4.clone() * D4
            + k5.clone() * D5
            + k6.clone() * D6
            + k7.clone() * D7)
            * h;
        let error = (k1.clone() * E1 + k3 * E3 + k4 * E4 + k5 * E5 + k6 * E6 + k7.clone() * E7) * h;
        let error_norm = self.scaled_norm(&error, y, &state);

        Step {
            state,
            derivative: k7,
            dense,
            error_norm,
        }
    }
}

/// Evaluates the continuous extension on `[t, t + h]` at fraction `theta`.
/// Without `dense` this is the cubic Hermite interpolant through the end
/// points and their derivatives.
fn interpolate<S: StateVector>(y0: &S, f0: &S, step: &Step<S>, h: f64, theta: f64) -> S {
    let theta1 = 1.0 - theta;
    let ydiff = step.state.clone() - y0.clone();
    let bspl = f0.clone() * h - ydiff.clone();
    let r4 = ydiff.clone() - step.derivative.clone() * h - bspl.clone();
    let inner = r4 + step.dense.clone() * theta1;
    y0.clone() + (ydiff + (bspl + inner * theta) * theta1) * theta
}

impl<T: EquationsOfMotion> Propagator for DormandPrince<T>
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
        let Tolerances { rtol, atol } = self.tolerances;
        if !(rtol > 0.0 && atol > 0.0) {
            return Err(IntegrationError::InvalidStep(format!(
                "tolerances must be positive, got rtol={} atol={}",
                rtol, atol
            )));
        }
        check_report_times(report_times)?;

        let (Some(&t0), Some(&t_end)) = (report_times.first(), report_times.last()) else {
            return Ok(());
        };
        if !initial.is_finite() {
            return Err(IntegrationError::NonFiniteState { t: t0 });
        }

        let mut t = t0;
        let mut y = initial.clone();
        let mut f = self.eom.compute_derivative(&y);

        // Report times sitting on the start point need no integration.
        let mut next = 0;
        while next < report_times.len() && report_times[next] <= t0 {
            if observer(report_times[next], &y).is_break() {
                return Ok(());
            }
            next += 1;
        }
        if next == report_times.len() {
            return Ok(());
        }

        let mut h = self.initial_step(&y, &f, t_end - t0);
        let mut steps = 0;
        let mut rejected = false;

        while next < report_times.len() {
            if steps >= self.max_steps {
                return Err(IntegrationError::MaxStepsExceeded {
                    max_steps: self.max_steps,
                    t,
                    t_end,
                });
            }

            let min_step = 10.0 * f64::EPSILON * t.abs().max(1.0);
            if h < min_step {
                return Err(IntegrationError::StepSizeTooSmall { t, step: h });
            }
            h = h.min(t_end - t);

            let step = self.attempt(&y, &f, h);
            steps += 1;

            if !step.error_norm.is_finite() || !step.state.is_finite() {
                // Treat overflow as a failed step and retry smaller.
                h *= MIN_FACTOR;
                rejected = true;
                continue;
            }

            if step.error_norm > 1.0 {
                let factor = (SAFETY * step.error_norm.powf(ERROR_EXPONENT)).max(MIN_FACTOR);
                h *= factor;
                rejected = true;
                continue;
            }

            let t_new = if t_end - (t + h) <= min_step { t_end } else { t + h };

            while next < report_times.len() && report_times[next] <= t_new {
                let t_report = report_times[next];
                let sample = if t_report == t_new {
                    step.state.clone()
                } else {
                    let theta = (t_report - t) / h;
                    interpolate(&y, &f, &step, h, theta)
                };
                if observer(t_report, &sample).is_break() {
                    return Ok(());
                }
                next += 1;
            }

            let mut factor = if step.error_norm == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * step.error_norm.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
            };
            if rejected {
                factor = factor.min(1.0);
            }
            rejected = false;

            t = t_new;
            y = step.state;
            f = step.derivative;
            h *= factor;

            if t >= t_end {
                break;
            }
        }

        Ok(())
    }
}
