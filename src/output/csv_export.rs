use crate::errors::OutputError;
use crate::flight::Trajectory;
use crate::simulation::LaunchReport;
use csv::Writer;
use std::fs::{self, File};
use std::io;
use std::path::Path;

const HEADER: [&str; 9] = [
    "Time (s)",
    "X (m)",
    "Y (m)",
    "Vx (m/s)",
    "Vy (m/s)",
    "Speed (m/s)",
    "Drag Force (N)",
    "Magnus Force (N)",
    "Energy (J)",
];

pub fn write_trajectory<W: io::Write>(sink: W, trajectory: &Trajectory) -> Result<(), OutputError> {
    let mut writer = Writer::from_writer(sink);
    writer.write_record(HEADER)?;

    for p in trajectory.points() {
        writer.write_record(&[
            p.t.to_string(),
            p.x.to_string(),
            p.y.to_string(),
            p.vx.to_string(),
            p.vy.to_string(),
            p.speed.to_string(),
            p.drag_force.to_string(),
            p.magnus_force.to_string(),
            p.energy.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

const LAUNCH_HEADER: [&str; 10] = [
    "Exit Speed (m/s)",
    "Spin Rate (rad/s)",
    "Impulse (N s)",
    "Wheel Surface Speed (m/s)",
    "Ball Surface Speed (m/s)",
    "Wheel RPM",
    "Spin RPM",
    "Ball Kinetic Energy (J)",
    "Wheel Kinetic Energy (J)",
    "Transfer Efficiency",
];

/// One header row and one value row.
pub fn write_launch_report<W: io::Write>(sink: W, report: &LaunchReport) -> Result<(), OutputError> {
    let mut writer = Writer::from_writer(sink);
    writer.write_record(LAUNCH_HEADER)?;
    writer.write_record(&[
        report.result.exit_speed.to_string(),
        report.result.spin_rate.to_string(),
        report.result.impulse.to_string(),
        report.wheel_surface_speed.to_string(),
        report.ball_surface_speed.to_string(),
        report.wheel_rpm.to_string(),
        report.spin_rpm.to_string(),
        report.ball_kinetic_energy.to_string(),
        report.wheel_kinetic_energy.to_string(),
        report.transfer_efficiency.to_string(),
    ])?;
    writer.flush()?;
    Ok(())
}

/// Writes the trajectory to `path`, creating missing parent directories.
pub fn write_trajectory_csv<P: AsRef<Path>>(
    path: P,
    trajectory: &Trajectory,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_trajectory(File::create(path)?, trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::TrajectoryPoint;
    use crate::config::SimulationConfig;
    use crate::fsm::FlightPhase;
    use crate::simulation::run_launch;

    #[test]
    fn test_header_and_rows() {
        let point = TrajectoryPoint {
            t: 0.5,
            x: 1.0,
            y: -0.25,
            vx: 2.0,
            vy: -3.0,
            speed: 13f64.sqrt(),
            drag_force: 0.1,
            magnus_force: 0.2,
            energy: 1.5,
        };
        let trajectory = Trajectory::new(vec![point], FlightPhase::GroundImpact);

        let mut buffer = Vec::new();
        write_trajectory(&mut buffer, &trajectory).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER.join(","));
        assert!(lines[1].starts_with("0.5,1,-0.25,2,-3,"));
        assert!(lines[1].ends_with(",0.1,0.2,1.5"));
    }

    #[test]
    fn test_launch_report_row() {
        let report = run_launch(&SimulationConfig::default()).unwrap();

        let mut buffer = Vec::new();
        write_launch_report(&mut buffer, &report).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], LAUNCH_HEADER.join(","));
        let values: Vec<f64> = lines[1].split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(values.len(), LAUNCH_HEADER.len());
        assert_eq!(values[0], report.result.exit_speed);
        assert_eq!(values[9], report.transfer_efficiency);
    }
}
