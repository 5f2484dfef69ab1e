//! # Arrow Ballistics
//!
//! Planar point-mass trajectories under gravity and quadratic drag, integrated
//! with fixed-step explicit Euler, plus a bisection search for the launch
//! angle that lands a shot at a given horizontal distance.
//!
//! ```no_run
//! use arrow_ballistics::{ballistics, calc_theta, SimulationParams};
//!
//! let trajectory = ballistics(&SimulationParams::default())?;
//! println!("range {:.2} m", trajectory.range());
//!
//! let angle = calc_theta(75.0, 50.0, 0.0002, 0.0003747)?;
//! println!("aim {:.3} deg", angle.to_degrees());
//! # Ok::<(), arrow_ballistics::BallisticsError>(())
//! ```

// Re-export the main types and functions
pub use angle_calculations::{calc_theta, AngleOutcome, AngleResult, AngleSolver, SearchState};
pub use batch::{solve_many, sweep_time_steps, time_step_sweep, StepSweepPoint};
pub use error::BallisticsError;
pub use inputs::SimulationParams;
pub use integrator::{ballistics, euler_step, TrajectoryIntegrator};
pub use trace::{format_initial, format_step, TraceWriter};
pub use trajectory::{Trajectory, TrajectoryColumns, TrajectorySample};
pub use trajectory_sampling::{downsample, height_at_distance, sample_indices};

// Module declarations
pub mod constants;
mod angle_calculations;
mod batch;
mod error;
mod inputs;
mod integrator;
mod trace;
mod trajectory;
mod trajectory_sampling;
