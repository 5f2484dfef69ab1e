//! Fixed-step explicit Euler trajectory integrator.
//!
//! State is (speed, flight-path angle, x, y). Each step evaluates the rates
//! at the previous sample only:
//!
//! ```text
//! dv = -g sin(a) - c v^2
//! da = -g cos(a) / v
//! dx =  v cos(a)
//! dy =  v sin(a)
//! ```
//!
//! The run ends with the first committed sample that lies past `stop_x` or
//! below `stop_y`; that crossing sample is part of the result.

use crate::constants::{DEFAULT_MAX_STEPS, GRAVITY_MPS2};
use crate::error::BallisticsError;
use crate::inputs::SimulationParams;
use crate::trace::TraceWriter;
use crate::trajectory::{Trajectory, TrajectorySample};
use std::io::Write;
use tracing::{debug, warn};

pub struct TrajectoryIntegrator {
    params: SimulationParams,
    gravity: f64,
    max_steps: usize,
}

impl TrajectoryIntegrator {
    pub fn new(params: SimulationParams) -> Self {
        Self {
            params,
            gravity: GRAVITY_MPS2,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.gravity = gravity;
    }

    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps;
    }

    /// Integrate and keep every sample. When `verbose` is set the trace goes
    /// to stdout.
    pub fn solve(&self) -> Result<Trajectory, BallisticsError> {
        if self.params.verbose {
            let stdout = std::io::stdout();
            self.solve_traced(stdout.lock())
        } else {
            self.collect(|_| Ok(()))
        }
    }

    /// Integrate and write the trace to `out` regardless of `verbose`
    pub fn solve_traced<W: Write>(&self, out: W) -> Result<Trajectory, BallisticsError> {
        let mut trace = TraceWriter::new(out);
        let trajectory = self.collect(|sample| trace.record(sample))?;
        trace.finish()?;
        Ok(trajectory)
    }

    /// Walk the same steps as `solve` but keep only the last sample
    pub fn final_sample(&self) -> Result<TrajectorySample, BallisticsError> {
        self.run(|_| Ok(()))
    }

    fn collect<F>(&self, mut visit: F) -> Result<Trajectory, BallisticsError>
    where
        F: FnMut(&TrajectorySample) -> Result<(), BallisticsError>,
    {
        let mut samples = Vec::new();
        self.run(|sample| {
            visit(sample)?;
            samples.push(*sample);
            Ok(())
        })?;
        Ok(Trajectory::from_samples(samples))
    }

    fn run<F>(&self, mut visit: F) -> Result<TrajectorySample, BallisticsError>
    where
        F: FnMut(&TrajectorySample) -> Result<(), BallisticsError>,
    {
        self.params.validate()?;
        if !self.gravity.is_finite() {
            return Err(BallisticsError::invalid("gravity", self.gravity, "must be finite"));
        }

        let p = &self.params;
        let mut current = TrajectorySample {
            time: 0.0,
            velocity: p.initial_speed,
            angle: p.initial_angle,
            x: p.initial_x,
            y: p.initial_y,
        };
        visit(&current)?;

        let mut steps = 0;
        while current.x <= p.stop_x && current.y >= p.stop_y {
            if steps >= self.max_steps {
                warn!(
                    max_steps = self.max_steps,
                    x = current.x,
                    y = current.y,
                    "step limit reached"
                );
                return Err(BallisticsError::StepLimitExceeded { max_steps: self.max_steps });
            }
            // The angle rate divides by the speed
            if current.velocity <= 0.0 {
                warn!(
                    step = steps,
                    time = current.time,
                    velocity = current.velocity,
                    "speed reached zero"
                );
                return Err(BallisticsError::NumericHazard {
                    step: steps,
                    time: current.time,
                    velocity: current.velocity,
                });
            }

            let next = euler_step(&current, p.time_step, p.drag_coefficient, self.gravity);
            steps += 1;
            if !is_finite_sample(&next) {
                warn!(step = steps, time = next.time, "non-finite state");
                return Err(BallisticsError::NumericHazard {
                    step: steps,
                    time: next.time,
                    velocity: next.velocity,
                });
            }
            current = next;
            visit(&current)?;
        }

        debug!(
            steps,
            range = current.x,
            height = current.y,
            time = current.time,
            "integration finished"
        );
        Ok(current)
    }
}

/// Advance one explicit Euler step from `prev`
pub fn euler_step(prev: &TrajectorySample, dt: f64, drag: f64, gravity: f64) -> TrajectorySample {
    let (sin_a, cos_a) = prev.angle.sin_cos();
    let v = prev.velocity;

    let dv = -gravity * sin_a - drag * v * v;
    let da = -gravity * cos_a / v;
    let dx = v * cos_a;
    let dy = v * sin_a;

    TrajectorySample {
        time: prev.time + dt,
        velocity: v + dv * dt,
        angle: prev.angle + da * dt,
        x: prev.x + dx * dt,
        y: prev.y + dy * dt,
    }
}

fn is_finite_sample(s: &TrajectorySample) -> bool {
    s.velocity.is_finite() && s.angle.is_finite() && s.x.is_finite() && s.y.is_finite()
}

/// Integrate one trajectory with the default gravity and step cap
pub fn ballistics(params: &SimulationParams) -> Result<Trajectory, BallisticsError> {
    TrajectoryIntegrator::new(params.clone()).solve()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_step_params() -> SimulationParams {
        // Level launch that passes x = 0.25 on its third 0.1 m step
        SimulationParams {
            initial_speed: 10.0,
            initial_angle: 0.0,
            initial_x: 0.0,
            initial_y: 0.0,
            time_step: 0.01,
            drag_coefficient: 0.0,
            stop_y: -100.0,
            stop_x: 0.25,
            verbose: false,
        }
    }

    #[test]
    fn test_first_sample_is_initial_state() {
        let params = SimulationParams {
            initial_x: 1.5,
            initial_y: 2.0,
            ..Default::default()
        };
        let traj = ballistics(&params).unwrap();
        let first = traj.initial();
        assert_eq!(first.time, 0.0);
        assert_eq!(first.velocity, params.initial_speed);
        assert_eq!(first.angle, params.initial_angle);
        assert_eq!(first.x, 1.5);
        assert_eq!(first.y, 2.0);
    }

    #[test]
    fn test_crossing_sample_is_committed() {
        let traj = ballistics(&SimulationParams::default()).unwrap();
        let samples = traj.samples();
        let last = samples[samples.len() - 1];
        let before = samples[samples.len() - 2];
        assert!(last.y < 0.0);
        assert!(before.y >= 0.0);
    }

    #[test]
    fn test_start_outside_bounds_gives_single_sample() {
        let below = SimulationParams { initial_y: -1.0, ..Default::default() };
        assert_eq!(ballistics(&below).unwrap().len(), 1);

        let beyond = SimulationParams { initial_x: 20_000.0, ..Default::default() };
        assert_eq!(ballistics(&beyond).unwrap().len(), 1);
    }

    #[test]
    fn test_three_steps_to_stop_x() {
        let traj = ballistics(&three_step_params()).unwrap();
        assert_eq!(traj.steps(), 3);
        assert!(traj.range() > 0.25);
        assert!(traj.samples()[2].x <= 0.25);
    }

    #[test]
    fn test_euler_step_level_flight() {
        let prev = TrajectorySample { time: 0.0, velocity: 10.0, angle: 0.0, x: 0.0, y: 0.0 };
        let next = euler_step(&prev, 0.1, 0.01, 9.81);
        assert!((next.velocity - (10.0 - 0.01 * 100.0 * 0.1)).abs() < 1e-12);
        assert!((next.angle - (-9.81 / 10.0 * 0.1)).abs() < 1e-12);
        assert!((next.x - 1.0).abs() < 1e-12);
        assert_eq!(next.y, 0.0);
        assert_eq!(next.time, 0.1);
    }

    #[test]
    fn test_vertical_launch_reports_numeric_hazard() {
        let params = SimulationParams {
            initial_speed: 10.0,
            initial_angle: std::f64::consts::FRAC_PI_2,
            time_step: 0.001,
            drag_coefficient: 0.0,
            ..Default::default()
        };
        match ballistics(&params) {
            Err(BallisticsError::NumericHazard { velocity, .. }) => assert!(velocity <= 0.0),
            other => panic!("expected numeric hazard, got {other:?}"),
        }
    }

    #[test]
    fn test_step_limit() {
        let mut integrator = TrajectoryIntegrator::new(SimulationParams::default());
        integrator.set_max_steps(10);
        assert_eq!(
            integrator.solve(),
            Err(BallisticsError::StepLimitExceeded { max_steps: 10 })
        );
    }

    #[test]
    fn test_invalid_time_step_is_rejected_before_stepping() {
        let params = SimulationParams { time_step: 0.0, ..Default::default() };
        assert!(matches!(
            ballistics(&params),
            Err(BallisticsError::InvalidParameter { name: "time_step", .. })
        ));
    }

    #[test]
    fn test_final_sample_matches_stored_run() {
        let integrator = TrajectoryIntegrator::new(SimulationParams::default());
        let traj = integrator.solve().unwrap();
        let last = integrator.final_sample().unwrap();
        assert_eq!(*traj.last(), last);
    }

    #[test]
    fn test_traced_run_writes_one_line_per_sample() {
        let integrator = TrajectoryIntegrator::new(three_step_params());
        let mut buf = Vec::new();
        let traj = integrator.solve_traced(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), traj.steps() + 1);
        assert!(lines[0].starts_with("(0.000, 0.000) - V:10.000 A:0.000"));
        assert!(lines[1].starts_with("Time 0.010:"));
        assert!(lines[2].starts_with("Time 0.020:"));
        assert!(lines[3].starts_with("Time 0.030:"));
    }

    #[test]
    fn test_zero_gravity_and_drag_flies_straight() {
        let mut integrator = TrajectoryIntegrator::new(SimulationParams {
            initial_speed: 50.0,
            initial_angle: 0.0,
            time_step: 0.01,
            drag_coefficient: 0.0,
            stop_x: 100.0,
            ..Default::default()
        });
        integrator.set_gravity(0.0);
        let traj = integrator.solve().unwrap();
        assert!(traj.iter().all(|s| s.y == 0.0 && s.velocity == 50.0));
        assert!(traj.range() > 100.0);
    }
}
