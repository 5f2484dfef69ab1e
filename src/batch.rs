//! Independent runs fanned out over the rayon thread pool.
//!
//! Every integration and every angle search is a pure function of its
//! inputs, so separate targets or separate time steps share nothing.

use crate::angle_calculations::{AngleResult, AngleSolver};
use crate::error::BallisticsError;
use crate::inputs::SimulationParams;
use crate::integrator::TrajectoryIntegrator;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Range obtained with one time step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepSweepPoint {
    pub time_step: f64,
    pub range: f64,
}

/// Solve each target distance independently, results in input order
pub fn solve_many(
    solver: &AngleSolver,
    distances: &[f64],
) -> Vec<Result<AngleResult, BallisticsError>> {
    distances.par_iter().map(|&d| solver.solve(d)).collect()
}

/// Time steps `10^(-5 + 0.02 i)` for `i` in `0..count`
pub fn sweep_time_steps(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 10f64.powf(-5.0 + i as f64 * 0.02))
        .collect()
}

/// Final range of `params` at every time step from [`sweep_time_steps`]
pub fn time_step_sweep(
    params: &SimulationParams,
    count: usize,
    max_steps: usize,
) -> Result<Vec<StepSweepPoint>, BallisticsError> {
    let points = sweep_time_steps(count)
        .into_par_iter()
        .map(|time_step| -> Result<StepSweepPoint, BallisticsError> {
            let run = SimulationParams {
                time_step,
                verbose: false,
                ..params.clone()
            };
            let mut integrator = TrajectoryIntegrator::new(run);
            integrator.set_max_steps(max_steps);
            let range = integrator.final_sample()?.x;
            Ok(StepSweepPoint { time_step, range })
        })
        .collect::<Result<Vec<_>, BallisticsError>>()?;
    debug!(count = points.len(), "time step sweep finished");
    Ok(points)
}
