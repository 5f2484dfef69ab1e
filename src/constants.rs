//! Physical and numerical constants used by the integrator and the angle solver

/// Gravitational acceleration in m/s²
pub const GRAVITY_MPS2: f64 = 9.81;

/// Conversion factor: degrees to radians
pub const DEGREES_TO_RADIANS: f64 = std::f64::consts::PI / 180.0;

/// Conversion factor: radians to degrees
pub const RADIANS_TO_DEGREES: f64 = 180.0 / std::f64::consts::PI;

// Default launch used by the plain entry point.
// 75 m/s at 3° is a typical target arrow; the drag coefficient is the
// quadratic deceleration factor (1/m) measured for the same arrow.

/// Default initial speed (m/s)
pub const DEFAULT_INITIAL_SPEED: f64 = 75.0;

/// Default launch angle (degrees)
pub const DEFAULT_LAUNCH_ANGLE_DEG: f64 = 3.0;

/// Default integration time step (s)
pub const DEFAULT_TIME_STEP: f64 = 0.0002;

/// Default quadratic drag coefficient (1/m)
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 0.0003747;

/// Default vertical stop bound (m): ground level
pub const DEFAULT_STOP_Y: f64 = 0.0;

/// Default horizontal stop bound (m)
pub const DEFAULT_STOP_X: f64 = 10_000.0;

/// Upper limit on Euler steps for one integration run.
///
/// A zero-drag 45° shot at 75 m/s with `dt = 2e-5` takes roughly 540k steps,
/// so this leaves ample room while still bounding memory for a stored run.
pub const DEFAULT_MAX_STEPS: usize = 5_000_000;

// Angle search constants (degrees unless noted)

/// Lower bracket of the launch angle search
pub const SEARCH_LOWER_DEG: f64 = -90.0;

/// Upper bracket of the launch angle search
pub const SEARCH_UPPER_DEG: f64 = 45.0;

/// First trial angle; its range decides reachability
pub const SEARCH_START_DEG: f64 = 10.0;

/// Angle returned when the target cannot be reached
pub const UNREACHABLE_ANGLE_DEG: f64 = 90.0;

/// Accepted landing error (m)
pub const RANGE_TOLERANCE: f64 = 0.1;

/// Maximum number of bisection iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
