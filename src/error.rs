// Error type shared by the integrator and the angle solver
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BallisticsError {
    /// A caller-supplied parameter is outside its valid domain
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Speed reached zero (or went non-finite) so the angle rate is undefined
    NumericHazard {
        step: usize,
        time: f64,
        velocity: f64,
    },
    /// The integration hit its step cap before crossing a stop bound
    StepLimitExceeded { max_steps: usize },
    /// Bisection ran out of iterations before meeting the range tolerance
    NoConvergence { iterations: usize, residual: f64 },
    /// Writing the trace output failed
    Trace { message: String },
}

impl BallisticsError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        BallisticsError::InvalidParameter { name, value, reason }
    }
}

impl fmt::Display for BallisticsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BallisticsError::InvalidParameter { name, value, reason } => {
                write!(f, "invalid parameter {name} = {value}: {reason}")
            }
            BallisticsError::NumericHazard { step, time, velocity } => write!(
                f,
                "numeric hazard at step {step} (t = {time:.4} s): velocity {velocity} leaves the angle rate undefined"
            ),
            BallisticsError::StepLimitExceeded { max_steps } => {
                write!(f, "integration exceeded {max_steps} steps without reaching a stop bound")
            }
            BallisticsError::NoConvergence { iterations, residual } => write!(
                f,
                "angle search did not converge after {iterations} iterations (range error {residual:.4} m)"
            ),
            BallisticsError::Trace { message } => write!(f, "trace output failed: {message}"),
        }
    }
}

impl Error for BallisticsError {}

impl From<std::io::Error> for BallisticsError {
    fn from(err: std::io::Error) -> Self {
        BallisticsError::Trace { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_parameter() {
        let err = BallisticsError::invalid("time_step", -1.0, "must be positive");
        let text = err.to_string();
        assert!(text.contains("time_step"));
        assert!(text.contains("must be positive"));
    }

    #[test]
    fn test_io_error_becomes_trace_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: BallisticsError = io.into();
        assert!(matches!(err, BallisticsError::Trace { .. }));
    }
}
