use crate::fsm::FlightPhase;
use serde::{Deserialize, Serialize};

/// One report sample of the flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub t: f64,            // s
    pub x: f64,            // m
    pub y: f64,            // m
    pub vx: f64,           // m/s
    pub vy: f64,           // m/s
    pub speed: f64,        // m/s
    pub drag_force: f64,   // N
    pub magnus_force: f64, // N
    pub energy: f64,       // J, translational kinetic + potential
}

/// Ground crossing located by linear interpolation between the last airborne
/// sample and the first sample below ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingEstimate {
    pub time: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub range: f64,
    pub max_height: f64,
    pub flight_time: f64,
    pub max_speed: f64,
    pub impact_speed: f64,
    pub impact_angle_deg: f64, // below horizontal
    pub landing_estimate: Option<LandingEstimate>,
}

/// Report samples from launch up to and including the first sample below
/// ground, or the whole horizon if the ball never came down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
    phase: FlightPhase,
}

impl Trajectory {
    pub fn new(points: Vec<TrajectoryPoint>, phase: FlightPhase) -> Self {
        Self { points, phase }
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn landed(&self) -> bool {
        self.phase == FlightPhase::GroundImpact
    }

    pub fn landing_estimate(&self) -> Option<LandingEstimate> {
        if !self.landed() {
            return None;
        }
        match self.points.as_slice() {
            [.., before, after] => {
                let fraction = before.y / (before.y - after.y);
                Some(LandingEstimate {
                    time: before.t + fraction * (after.t - before.t),
                    distance: before.x + fraction * (after.x - before.x),
                })
            }
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<TrajectorySummary> {
        let last = self.points.last()?;
        let max_height = self
            .points
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_speed = self.points.iter().map(|p| p.speed).fold(0.0, f64::max);

        Some(TrajectorySummary {
            range: last.x,
            max_height,
            flight_time: last.t,
            max_speed,
            impact_speed: last.speed,
            impact_angle_deg: (-last.vy).atan2(last.vx).to_degrees(),
            landing_estimate: self.landing_estimate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn point(t: f64, x: f64, y: f64, vx: f64, vy: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            t,
            x,
            y,
            vx,
            vy,
            speed: (vx * vx + vy * vy).sqrt(),
            drag_force: 0.0,
            magnus_force: 0.0,
            energy: 0.0,
        }
    }

    fn landed() -> Trajectory {
        Trajectory::new(
            vec![
                point(0.0, 0.0, 0.2, 3.0, 3.0),
                point(0.5, 1.5, 1.0, 3.0, 0.0),
                point(1.0, 3.0, 0.3, 3.0, -3.0),
                point(1.1, 3.3, -0.1, 3.0, -3.0),
            ],
            FlightPhase::GroundImpact,
        )
    }

    #[test]
    fn test_summary() {
        let summary = landed().summary().unwrap();
        assert_eq!(summary.range, 3.3);
        assert_eq!(summary.max_height, 1.0);
        assert_eq!(summary.flight_time, 1.1);
        assert_abs_diff_eq!(summary.max_speed, 18f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(summary.impact_angle_deg, 45.0, epsilon = 1e-12);
    }

    #[test]
    fn test_landing_estimate_interpolates_crossing() {
        let estimate = landed().landing_estimate().unwrap();
        assert_abs_diff_eq!(estimate.time, 1.075, epsilon = 1e-12);
        assert_abs_diff_eq!(estimate.distance, 3.225, epsilon = 1e-12);
    }

    #[test]
    fn test_no_landing_estimate_while_airborne() {
        let trajectory = Trajectory::new(
            vec![point(0.0, 0.0, 0.2, 3.0, 3.0), point(0.5, 1.5, 1.0, 3.0, 0.0)],
            FlightPhase::HorizonExhausted,
        );
        assert!(trajectory.landing_estimate().is_none());
        assert!(trajectory.summary().unwrap().landing_estimate.is_none());
    }

    #[test]
    fn test_empty_trajectory_has_no_summary() {
        assert!(Trajectory::new(Vec::new(), FlightPhase::Integrating)
            .summary()
            .is_none());
    }
}
