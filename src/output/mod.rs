pub mod csv_export;

pub use csv_export::{write_launch_report, write_trajectory, write_trajectory_csv};
