//! Launch angle search.
//!
//! Bisection over the launch angle (degrees, bracket `[-90, 45]`, first trial
//! 10°) on the signed landing error `distance - final_x`. Each iteration runs
//! one full integration from the origin with ground-level stop bounds and
//! reads only its final horizontal position.
//!
//! Range is not strictly monotonic in angle once drag is involved, so the
//! result is an approximate inverse: the returned angle lands within the
//! range tolerance of the target, which need not be the angle that produced
//! a given range in the first place.

use crate::constants::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_STEPS, DEGREES_TO_RADIANS, GRAVITY_MPS2, RANGE_TOLERANCE,
    SEARCH_LOWER_DEG, SEARCH_START_DEG, SEARCH_UPPER_DEG, UNREACHABLE_ANGLE_DEG,
};
use crate::error::BallisticsError;
use crate::inputs::SimulationParams;
use crate::integrator::TrajectoryIntegrator;
use tracing::{debug, trace};

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleOutcome {
    /// Landing error is inside the tolerance
    Converged,
    /// Negative distance, or farther than the first trial reaches
    Unreachable,
}

/// Result of angle calculation
#[derive(Debug, Clone, PartialEq)]
pub struct AngleResult {
    pub angle_rad: f64,
    pub iterations_used: usize,
    pub final_error: f64, // m, distance - final_x
    pub outcome: AngleOutcome,
}

impl AngleResult {
    pub fn angle_deg(&self) -> f64 {
        self.angle_rad.to_degrees()
    }

    pub fn is_unreachable(&self) -> bool {
        self.outcome == AngleOutcome::Unreachable
    }
}

/// Bisection state, angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchState {
    Searching { lower: f64, upper: f64, trial: f64 },
    Converged { angle: f64 },
    Unreachable,
}

impl SearchState {
    /// Decide from the first trial's range whether a search is worth running
    pub fn start(distance: f64, reference_range: f64) -> Self {
        if distance < 0.0 || reference_range < distance {
            SearchState::Unreachable
        } else {
            SearchState::Searching {
                lower: SEARCH_LOWER_DEG,
                upper: SEARCH_UPPER_DEG,
                trial: SEARCH_START_DEG,
            }
        }
    }

    /// Apply one landing error to a searching state; terminal states are kept
    pub fn advance(self, error: f64, tolerance: f64) -> Self {
        match self {
            SearchState::Searching { lower, upper, trial } => {
                if error.abs() < tolerance {
                    SearchState::Converged { angle: trial }
                } else if error < 0.0 {
                    // Overshot
                    SearchState::Searching { lower, upper: trial, trial: (trial + lower) / 2.0 }
                } else {
                    SearchState::Searching { lower: trial, upper, trial: (upper + trial) / 2.0 }
                }
            }
            terminal => terminal,
        }
    }
}

pub struct AngleSolver {
    initial_speed: f64,
    time_step: f64,
    drag_coefficient: f64,
    gravity: f64,
    max_steps: usize,
    max_iterations: usize,
    tolerance: f64,
}

impl AngleSolver {
    pub fn new(initial_speed: f64, time_step: f64, drag_coefficient: f64) -> Self {
        Self {
            initial_speed,
            time_step,
            drag_coefficient,
            gravity: GRAVITY_MPS2,
            max_steps: DEFAULT_MAX_STEPS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: RANGE_TOLERANCE,
        }
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.gravity = gravity;
    }

    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps;
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Final horizontal position for a launch at `angle_rad` from the origin
    pub fn range_at(&self, angle_rad: f64) -> Result<f64, BallisticsError> {
        let params = SimulationParams::launch(
            self.initial_speed,
            angle_rad,
            self.time_step,
            self.drag_coefficient,
        );
        let mut integrator = TrajectoryIntegrator::new(params);
        integrator.set_gravity(self.gravity);
        integrator.set_max_steps(self.max_steps);
        Ok(integrator.final_sample()?.x)
    }

    pub fn solve(&self, distance: f64) -> Result<AngleResult, BallisticsError> {
        if distance.is_nan() {
            return Err(BallisticsError::invalid("distance", distance, "must not be NaN"));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(BallisticsError::invalid(
                "tolerance",
                self.tolerance,
                "must be finite and greater than zero",
            ));
        }

        let reference_range = self.range_at(SEARCH_START_DEG * DEGREES_TO_RADIANS)?;
        let mut state = SearchState::start(distance, reference_range);
        let mut range = reference_range;
        let mut error = distance - reference_range;
        let mut iterations = 0;

        loop {
            match state {
                SearchState::Unreachable => {
                    debug!(distance, reference_range, "target out of reach");
                    return Ok(AngleResult {
                        angle_rad: UNREACHABLE_ANGLE_DEG * DEGREES_TO_RADIANS,
                        iterations_used: iterations,
                        final_error: error,
                        outcome: AngleOutcome::Unreachable,
                    });
                }
                SearchState::Converged { angle } => {
                    debug!(distance, angle_deg = angle, iterations, error, "angle search converged");
                    return Ok(AngleResult {
                        angle_rad: angle * DEGREES_TO_RADIANS,
                        iterations_used: iterations,
                        final_error: error,
                        outcome: AngleOutcome::Converged,
                    });
                }
                SearchState::Searching { lower, upper, trial } => {
                    if iterations >= self.max_iterations {
                        return Err(BallisticsError::NoConvergence {
                            iterations,
                            residual: error,
                        });
                    }
                    // The reference run already covers the first trial
                    if iterations > 0 {
                        range = self.range_at(trial * DEGREES_TO_RADIANS)?;
                    }
                    iterations += 1;
                    error = distance - range;
                    trace!(iteration = iterations, lower, upper, trial, range, error, "bisection step");
                    state = state.advance(error, self.tolerance);
                }
            }
        }
    }
}

/// Launch angle (radians) that lands `v0` within 0.1 m of `dist`, or 90°
/// when the target cannot be reached
pub fn calc_theta(v0: f64, dist: f64, dt: f64, coeff: f64) -> Result<f64, BallisticsError> {
    Ok(AngleSolver::new(v0, dt, coeff).solve(dist)?.angle_rad)
}
