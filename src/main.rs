use clap::{Args, Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use wheelshot::config::{SimulationConfig, SolverChoice};
use wheelshot::constants::RAD_S_TO_RPM;
use wheelshot::errors::{FlightError, SimulationError};
use wheelshot::flight::{Trajectory, TrajectorySummary};
use wheelshot::output::{write_launch_report, write_trajectory, write_trajectory_csv};
use wheelshot::{run, run_launch, LaunchReport};

#[derive(Parser)]
#[command(name = "wheelshot")]
#[command(version = "0.1.0")]
#[command(about = "Exit conditions and flight of a ball launched by a spinning wheel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute exit speed and spin from the impulse model
    Launch {
        #[command(flatten)]
        params: ParameterArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Launch the ball and integrate its flight to ground impact
    Trajectory {
        #[command(flatten)]
        params: ParameterArgs,

        #[command(flatten)]
        flight: FlightArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Also write the samples to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print every sample in table output
        #[arg(long)]
        full: bool,
    },

    /// Print the resolved parameter set as JSON
    Info {
        #[command(flatten)]
        params: ParameterArgs,

        #[command(flatten)]
        flight: FlightArgs,
    },
}

#[derive(Args, Debug)]
struct ParameterArgs {
    /// JSON configuration file; flags override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Wheel angular speed before contact (rad/s)
    #[arg(short = 'w', long)]
    wheel_speed: Option<f64>,

    /// Wheel speed before contact (rpm)
    #[arg(long, conflicts_with = "wheel_speed")]
    wheel_rpm: Option<f64>,

    /// Wheel radius (m)
    #[arg(long)]
    wheel_radius: Option<f64>,

    /// Wheel mass (kg)
    #[arg(long)]
    wheel_mass: Option<f64>,

    /// Ball mass (kg)
    #[arg(long)]
    ball_mass: Option<f64>,

    /// Ball radius (m)
    #[arg(long)]
    ball_radius: Option<f64>,

    /// Ball inertia factor k in I = k m r² (0.4 solid, 0.667 hollow)
    #[arg(long)]
    inertia_factor: Option<f64>,

    /// Air density (kg/m³)
    #[arg(long)]
    air_density: Option<f64>,

    /// Gravitational acceleration (m/s²)
    #[arg(long)]
    gravity: Option<f64>,

    /// Drag coefficient
    #[arg(long)]
    drag_coefficient: Option<f64>,

    /// Magnus factor alpha in C_L = alpha * S
    #[arg(long)]
    magnus_factor: Option<f64>,
}

#[derive(Args, Debug)]
struct FlightArgs {
    /// Launch angle above horizontal (degrees)
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Launch height above ground (m)
    #[arg(long)]
    height: Option<f64>,

    /// Integration horizon (s)
    #[arg(short = 't', long)]
    horizon: Option<f64>,

    /// Number of evenly spaced report samples over the horizon
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Integration method
    #[arg(long)]
    solver: Option<SolverArg>,

    /// Relative tolerance (adaptive solver)
    #[arg(long)]
    rtol: Option<f64>,

    /// Absolute tolerance (adaptive solver)
    #[arg(long)]
    atol: Option<f64>,

    /// Maximum number of steps (adaptive solver)
    #[arg(long)]
    max_steps: Option<usize>,

    /// Step size (fixed-step solver, s)
    #[arg(long)]
    dt: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    Adaptive,
    Rk4,
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl ParameterArgs {
    fn resolve(&self) -> Result<SimulationConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::default(),
        };

        set(&mut config.wheel_angular_speed, self.wheel_speed);
        set(
            &mut config.wheel_angular_speed,
            self.wheel_rpm.map(|rpm| rpm / RAD_S_TO_RPM),
        );
        set(&mut config.wheel_radius, self.wheel_radius);
        set(&mut config.wheel_mass, self.wheel_mass);
        set(&mut config.ball_mass, self.ball_mass);
        set(&mut config.ball_radius, self.ball_radius);
        set(&mut config.inertia_factor, self.inertia_factor);
        set(&mut config.air_density, self.air_density);
        set(&mut config.gravity, self.gravity);
        set(&mut config.drag_coefficient, self.drag_coefficient);
        set(&mut config.magnus_factor, self.magnus_factor);
        Ok(config)
    }
}

impl FlightArgs {
    fn apply(&self, config: &mut SimulationConfig) {
        set(&mut config.launch_angle_deg, self.angle);
        set(&mut config.launch_height, self.height);
        set(&mut config.horizon, self.horizon);
        set(&mut config.samples, self.samples);
        set(
            &mut config.solver,
            self.solver.map(|s| match s {
                SolverArg::Adaptive => SolverChoice::Adaptive,
                SolverArg::Rk4 => SolverChoice::FixedStep,
            }),
        );
        set(&mut config.rtol, self.rtol);
        set(&mut config.atol, self.atol);
        set(&mut config.max_steps, self.max_steps);
        set(&mut config.fixed_dt, self.dt);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Launch { params, output } => {
            let config = params.resolve()?;
            let report = run_launch(&config)?;
            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Csv => write_launch_report(io::stdout().lock(), &report)?,
                OutputFormat::Table => display_launch(&report),
            }
        }

        Commands::Trajectory {
            params,
            flight,
            output,
            csv,
            full,
        } => {
            let mut config = params.resolve()?;
            flight.apply(&mut config);
            config.validate()?;

            let report = match run(&config) {
                Ok(report) => report,
                Err(SimulationError::Flight(FlightError::InconclusiveTrajectory {
                    horizon,
                    final_height,
                    trajectory,
                })) => {
                    eprintln!(
                        "Warning: ball still airborne at the {} s horizon (height {:.3} m).",
                        horizon, final_height
                    );
                    eprintln!("Rerun with a longer --horizon to reach ground impact.");
                    if let Some(path) = &csv {
                        write_trajectory_csv(path, &trajectory)?;
                        eprintln!("Partial trajectory written to {}", path.display());
                    }
                    return Err(FlightError::InconclusiveTrajectory {
                        horizon,
                        final_height,
                        trajectory,
                    }
                    .into());
                }
                Err(e) => return Err(e.into()),
            };

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Csv => write_trajectory(io::stdout().lock(), &report.trajectory)?,
                OutputFormat::Table => {
                    display_launch(&report.launch);
                    println!();
                    display_summary(&report.summary);
                    if full {
                        println!();
                        display_points(&report.trajectory);
                    }
                }
            }

            if let Some(path) = &csv {
                write_trajectory_csv(path, &report.trajectory)?;
                eprintln!("Trajectory data has been written to {}", path.display());
            }
        }

        Commands::Info { params, flight } => {
            let mut config = params.resolve()?;
            flight.apply(&mut config);
            config.validate()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn display_launch(report: &LaunchReport) {
    println!("Launch");
    println!(
        "  Wheel speed:        {:>10.1} rpm ({:.1} m/s at rim)",
        report.wheel_rpm, report.wheel_surface_speed
    );
    println!("  Contact impulse:    {:>10.4} N·s", report.result.impulse);
    println!("  Exit speed V_b:     {:>10.2} m/s", report.result.exit_speed);
    println!(
        "  Ball spin omega_b:  {:>10.2} rad/s ({:.0} rpm)",
        report.result.spin_rate, report.spin_rpm
    );
    println!("  Ball surface speed: {:>10.2} m/s", report.ball_surface_speed);
    println!(
        "  Energy transfer:    {:>10.3} J of {:.3} J ({:.1}%)",
        report.ball_kinetic_energy,
        report.wheel_kinetic_energy,
        report.transfer_efficiency * 100.0
    );
}

fn display_summary(summary: &TrajectorySummary) {
    println!("Flight");
    println!("  Range:              {:>10.3} m", summary.range);
    println!("  Max height:         {:>10.3} m", summary.max_height);
    println!("  Flight time:        {:>10.3} s", summary.flight_time);
    println!("  Max speed:          {:>10.3} m/s", summary.max_speed);
    println!(
        "  Impact:             {:>10.3} m/s at {:.1} deg",
        summary.impact_speed, summary.impact_angle_deg
    );
    if let Some(estimate) = summary.landing_estimate {
        println!(
            "  Interpolated landing: x = {:.3} m at t = {:.3} s",
            estimate.distance, estimate.time
        );
    }
}

fn display_points(trajectory: &Trajectory) {
    println!(
        "{:>8} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "t (s)", "x (m)", "y (m)", "Vx", "Vy", "Fd (N)", "Fm (N)"
    );
    for p in trajectory.points() {
        println!(
            "{:>8.3} {:>9.4} {:>9.4} {:>9.3} {:>9.3} {:>9.4} {:>9.4}",
            p.t, p.x, p.y, p.vx, p.vy, p.drag_force, p.magnus_force
        );
    }
}
