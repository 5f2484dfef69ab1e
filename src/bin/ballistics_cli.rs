use arrow_ballistics::constants::{
    DEFAULT_DRAG_COEFFICIENT, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_STEPS, DEFAULT_STOP_X,
    DEFAULT_STOP_Y, DEFAULT_TIME_STEP, RANGE_TOLERANCE,
};
use arrow_ballistics::{
    downsample, time_step_sweep, AngleResult, AngleSolver, BallisticsError, SimulationParams,
    StepSweepPoint, Trajectory, TrajectoryIntegrator, TrajectorySample,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "ballistics-cli")]
#[command(version)]
#[command(about = "Projectile trajectories with quadratic drag and launch angle solving", long_about = None)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a single trajectory
    Trajectory {
        #[command(flatten)]
        launch: LaunchArgs,

        /// Load all simulation parameters from a JSON file instead of the flags above
        #[arg(long)]
        params: Option<PathBuf>,

        /// Print every sample while integrating
        #[arg(long)]
        verbose: bool,

        /// Step cap for the integration
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Show every sample instead of a summary table
        #[arg(long)]
        full: bool,

        /// Number of evenly spaced samples in the summary table
        #[arg(long, default_value = "10")]
        points: usize,
    },

    /// Find the launch angle that lands at a distance
    Solve {
        /// Initial speed (m/s)
        #[arg(short = 'v', long, default_value = "75.0")]
        velocity: f64,

        /// Target horizontal distance (m)
        #[arg(short = 'd', long, allow_hyphen_values = true)]
        distance: Vec<f64>,

        /// Time step (seconds)
        #[arg(long, default_value_t = DEFAULT_TIME_STEP)]
        time_step: f64,

        /// Quadratic drag coefficient (1/m)
        #[arg(long, default_value_t = DEFAULT_DRAG_COEFFICIENT)]
        drag: f64,

        /// Bisection iteration cap
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,

        /// Accepted landing error (m)
        #[arg(long, default_value_t = RANGE_TOLERANCE)]
        tolerance: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Final range over a logarithmic sweep of time steps
    Sweep {
        #[command(flatten)]
        launch: LaunchArgs,

        /// Number of time steps, starting at 1e-5
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,

        /// Step cap for each integration
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display model information
    Info,
}

#[derive(clap::Args)]
struct LaunchArgs {
    /// Initial speed (m/s)
    #[arg(short = 'v', long, default_value = "75.0")]
    velocity: f64,

    /// Launch angle (degrees)
    #[arg(short = 'a', long, default_value = "3.0", allow_hyphen_values = true)]
    angle: f64,

    /// Initial horizontal position (m)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    x0: f64,

    /// Initial height (m)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    y0: f64,

    /// Time step (seconds)
    #[arg(long, default_value_t = DEFAULT_TIME_STEP)]
    time_step: f64,

    /// Quadratic drag coefficient (1/m)
    #[arg(long, default_value_t = DEFAULT_DRAG_COEFFICIENT)]
    drag: f64,

    /// Stop once height drops below this (m)
    #[arg(long, default_value_t = DEFAULT_STOP_Y, allow_hyphen_values = true)]
    stop_y: f64,

    /// Stop once horizontal position passes this (m)
    #[arg(long, default_value_t = DEFAULT_STOP_X)]
    stop_x: f64,
}

impl LaunchArgs {
    fn to_params(&self) -> SimulationParams {
        SimulationParams {
            initial_speed: self.velocity,
            initial_angle: self.angle.to_radians(),
            initial_x: self.x0,
            initial_y: self.y0,
            time_step: self.time_step,
            drag_coefficient: self.drag,
            stop_y: self.stop_y,
            stop_x: self.stop_x,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
struct TrajectoryReport<'a> {
    range: f64,
    max_height: f64,
    time_of_flight: f64,
    impact_velocity: f64,
    steps: usize,
    trajectory: &'a [TrajectorySample],
}

#[derive(Debug, Serialize)]
struct SolveReport {
    distance: f64,
    angle_deg: f64,
    angle_rad: f64,
    reachable: bool,
    iterations: usize,
    final_error: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn init_logging(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("arrow_ballistics=info,ballistics_cli=info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = log_file.map(|path| {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ballistics.log".into());
        fmt::layer()
            .with_writer(tracing_appender::rolling::never(dir, name))
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref());

    match cli.command {
        Commands::Trajectory { launch, params, verbose, max_steps, output, full, points } => {
            let mut sim = match params {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)?;
                    serde_json::from_str::<SimulationParams>(&text)?
                }
                None => launch.to_params(),
            };
            sim.verbose = sim.verbose || verbose;

            let mut integrator = TrajectoryIntegrator::new(sim);
            integrator.set_max_steps(max_steps);

            let start = Instant::now();
            // Keep stdout parseable for machine-readable output
            let trajectory = match output {
                OutputFormat::Json | OutputFormat::Csv if integrator.params().verbose => {
                    integrator.solve_traced(std::io::stderr().lock())?
                }
                _ => integrator.solve()?,
            };
            info!(
                samples = trajectory.len(),
                elapsed_s = start.elapsed().as_secs_f64(),
                "trajectory integrated"
            );

            display_trajectory(&trajectory, output, full, points)?;
        }

        Commands::Solve { velocity, distance, time_step, drag, max_iterations, tolerance, output } => {
            if distance.is_empty() {
                return Err("at least one --distance is required".into());
            }
            let mut solver = AngleSolver::new(velocity, time_step, drag);
            solver.set_max_iterations(max_iterations);
            solver.set_tolerance(tolerance);

            let results = arrow_ballistics::solve_many(&solver, &distance);
            let reports: Vec<SolveReport> = distance
                .iter()
                .zip(results)
                .map(|(&d, result)| match result {
                    Ok(solution) => solve_report(d, &solution),
                    Err(err) => {
                        warn!(distance = d, %err, "angle search failed");
                        failed_report(d, &err)
                    }
                })
                .collect();
            display_solutions(&reports, output)?;
        }

        Commands::Sweep { launch, count, max_steps, output } => {
            let start = Instant::now();
            let points = time_step_sweep(&launch.to_params(), count, max_steps)?;
            info!(count, elapsed_s = start.elapsed().as_secs_f64(), "sweep done");
            display_sweep(&points, output)?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      ARROW BALLISTICS v{:<16}║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Planar point-mass trajectories.        ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Model:                                 ║");
            println!("║ • Gravity 9.81 m/s²                    ║");
            println!("║ • Quadratic drag (c·v²)                ║");
            println!("║ • Fixed-step explicit Euler            ║");
            println!("║ • Bisection launch angle search        ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn solve_report(distance: f64, result: &AngleResult) -> SolveReport {
    SolveReport {
        distance,
        angle_deg: result.angle_deg(),
        angle_rad: result.angle_rad,
        reachable: !result.is_unreachable(),
        iterations: result.iterations_used,
        final_error: result.final_error,
        error: None,
    }
}

fn failed_report(distance: f64, err: &BallisticsError) -> SolveReport {
    SolveReport {
        distance,
        angle_deg: f64::NAN,
        angle_rad: f64::NAN,
        reachable: false,
        iterations: 0,
        final_error: f64::NAN,
        error: Some(err.to_string()),
    }
}

fn display_trajectory(
    trajectory: &Trajectory,
    format: OutputFormat,
    full: bool,
    points: usize,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let report = TrajectoryReport {
                range: trajectory.range(),
                max_height: trajectory.max_height(),
                time_of_flight: trajectory.time_of_flight(),
                impact_velocity: trajectory.impact_velocity(),
                steps: trajectory.steps(),
                trajectory: trajectory.samples(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        OutputFormat::Csv => {
            println!("time,x,y,velocity,angle_deg");
            for s in trajectory {
                println!(
                    "{:.4},{:.3},{:.3},{:.3},{:.3}",
                    s.time,
                    s.x,
                    s.y,
                    s.velocity,
                    s.angle.to_degrees()
                );
            }
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Range:             {:>8.2} m          ║", trajectory.range());
            println!("║ Max Height:        {:>8.2} m          ║", trajectory.max_height());
            println!("║ Time of Flight:    {:>8.3} s          ║", trajectory.time_of_flight());
            println!("║ Impact Velocity:   {:>8.2} m/s        ║", trajectory.impact_velocity());
            println!("║ Steps:             {:>8}            ║", trajectory.steps());
            println!("╚════════════════════════════════════════╝");

            let rows = if full {
                trajectory.samples().to_vec()
            } else {
                downsample(trajectory, points)
            };
            println!("┌──────────┬──────────┬──────────┬──────────┬──────────┐");
            println!("│ Time (s) │  X (m)   │  Y (m)   │ Vel(m/s) │ Ang(deg) │");
            println!("├──────────┼──────────┼──────────┼──────────┼──────────┤");
            for s in &rows {
                println!(
                    "│ {:>8.3} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.3} │",
                    s.time,
                    s.x,
                    s.y,
                    s.velocity,
                    s.angle.to_degrees()
                );
            }
            println!("└──────────┴──────────┴──────────┴──────────┴──────────┘");
        }
    }

    Ok(())
}

fn display_solutions(reports: &[SolveReport], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reports)?);
        }

        OutputFormat::Csv => {
            println!("distance,angle_deg,reachable,iterations,final_error,error");
            for r in reports {
                println!(
                    "{:.3},{:.4},{},{},{:.4},{}",
                    r.distance,
                    r.angle_deg,
                    r.reachable,
                    r.iterations,
                    r.final_error,
                    r.error.as_deref().unwrap_or("")
                );
            }
        }

        OutputFormat::Table => {
            println!("┌──────────┬──────────┬───────────┬──────┬──────────┐");
            println!("│ Dist (m) │ Ang(deg) │ Reachable │ Iter │ Err (m)  │");
            println!("├──────────┼──────────┼───────────┼──────┼──────────┤");
            for r in reports {
                if let Some(err) = &r.error {
                    println!("│ {:>8.2} │ failed: {}", r.distance, err);
                    continue;
                }
                println!(
                    "│ {:>8.2} │ {:>8.3} │ {:>9} │ {:>4} │ {:>8.4} │",
                    r.distance,
                    r.angle_deg,
                    if r.reachable { "yes" } else { "no" },
                    r.iterations,
                    r.final_error
                );
            }
            println!("└──────────┴──────────┴───────────┴──────┴──────────┘");
        }
    }

    Ok(())
}

fn display_sweep(points: &[StepSweepPoint], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(points)?);
        }

        OutputFormat::Csv => {
            println!("time_step,range");
            for p in points {
                println!("{:e},{:.4}", p.time_step, p.range);
            }
        }

        OutputFormat::Table => {
            println!("┌──────────────┬──────────────┐");
            println!("│ Time step(s) │  Range (m)   │");
            println!("├──────────────┼──────────────┤");
            for p in points {
                println!("│ {:>12.4e} │ {:>12.4} │", p.time_step, p.range);
            }
            println!("└──────────────┴──────────────┘");
        }
    }

    Ok(())
}
