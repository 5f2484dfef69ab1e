// Simulation input parameters
use crate::constants::{
    DEFAULT_DRAG_COEFFICIENT, DEFAULT_INITIAL_SPEED, DEFAULT_LAUNCH_ANGLE_DEG, DEFAULT_STOP_X,
    DEFAULT_STOP_Y, DEFAULT_TIME_STEP, DEGREES_TO_RADIANS,
};
use crate::error::BallisticsError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub initial_speed: f64,    // m/s
    pub initial_angle: f64,    // radians
    pub initial_x: f64,        // m
    pub initial_y: f64,        // m
    pub time_step: f64,        // s
    pub drag_coefficient: f64, // 1/m, deceleration = c * v^2
    pub stop_y: f64,           // stop once y drops below this
    pub stop_x: f64,           // stop once x passes this
    pub verbose: bool,         // emit the per-sample trace
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            initial_speed: DEFAULT_INITIAL_SPEED,
            initial_angle: DEFAULT_LAUNCH_ANGLE_DEG * DEGREES_TO_RADIANS,
            initial_x: 0.0,
            initial_y: 0.0,
            time_step: DEFAULT_TIME_STEP,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            stop_y: DEFAULT_STOP_Y,
            stop_x: DEFAULT_STOP_X,
            verbose: false,
        }
    }
}

impl SimulationParams {
    /// Launch from the origin at `angle` radians with the solver's stop bounds
    pub fn launch(initial_speed: f64, angle: f64, time_step: f64, drag_coefficient: f64) -> Self {
        Self {
            initial_speed,
            initial_angle: angle,
            initial_x: 0.0,
            initial_y: 0.0,
            time_step,
            drag_coefficient,
            stop_y: DEFAULT_STOP_Y,
            stop_x: DEFAULT_STOP_X,
            verbose: false,
        }
    }

    /// True when the initial position already lies past a stop bound
    pub fn starts_outside_bounds(&self) -> bool {
        self.initial_x > self.stop_x || self.initial_y < self.stop_y
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(BallisticsError::invalid(
                "time_step",
                self.time_step,
                "must be finite and greater than zero",
            ));
        }
        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            return Err(BallisticsError::invalid(
                "initial_speed",
                self.initial_speed,
                "must be finite and greater than zero",
            ));
        }
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(BallisticsError::invalid(
                "drag_coefficient",
                self.drag_coefficient,
                "must be finite and non-negative",
            ));
        }
        for (name, value) in [
            ("initial_angle", self.initial_angle),
            ("initial_x", self.initial_x),
            ("initial_y", self.initial_y),
        ] {
            if !value.is_finite() {
                return Err(BallisticsError::invalid(name, value, "must be finite"));
            }
        }
        // Infinite stop bounds are allowed (never stop on that axis), NaN is not
        for (name, value) in [("stop_y", self.stop_y), ("stop_x", self.stop_x)] {
            if value.is_nan() {
                return Err(BallisticsError::invalid(name, value, "must not be NaN"));
            }
        }
        Ok(())
    }
}
