//! Human-readable per-sample trace.
//!
//! The launch sample is written as `(x, y) - V:v A:deg`; every later sample
//! is prefixed with its elapsed time, `Time t: (x, y) - V:v A:deg`. All
//! numbers use three decimals and the angle is shown in degrees.

use crate::constants::RADIANS_TO_DEGREES;
use crate::error::BallisticsError;
use crate::trajectory::TrajectorySample;
use std::io::Write;

/// Trace line for the launch sample
pub fn format_initial(sample: &TrajectorySample) -> String {
    format!(
        "({:.3}, {:.3}) - V:{:.3} A:{:.3}",
        sample.x,
        sample.y,
        sample.velocity,
        sample.angle * RADIANS_TO_DEGREES
    )
}

/// Trace line for any sample after the first
pub fn format_step(sample: &TrajectorySample) -> String {
    format!(
        "Time {:.3}: ({:.3}, {:.3}) - V:{:.3} A:{:.3}",
        sample.time,
        sample.x,
        sample.y,
        sample.velocity,
        sample.angle * RADIANS_TO_DEGREES
    )
}

/// Line-oriented trace sink over any writer
pub struct TraceWriter<W: Write> {
    out: W,
    lines: usize,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Write one sample, choosing the format from its position in the run
    pub fn record(&mut self, sample: &TrajectorySample) -> Result<(), BallisticsError> {
        let line = if self.lines == 0 {
            format_initial(sample)
        } else {
            format_step(sample)
        };
        writeln!(self.out, "{line}")?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn finish(mut self) -> Result<W, BallisticsError> {
        self.out.flush()?;
        Ok(self.out)
    }
}
