use serde::Serialize;

/// One integration sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time: f64,     // s
    pub velocity: f64, // m/s, along the flight path
    pub angle: f64,    // radians, flight-path angle above horizontal
    pub x: f64,        // m
    pub y: f64,        // m
}

/// Time-ordered record of one integration run.
///
/// Always holds at least the initial sample. Built by the integrator and
/// handed to the caller by value; there is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
}

/// Column-major export of a trajectory: five sequences of equal length
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryColumns {
    pub time: Vec<f64>,
    pub velocity: Vec<f64>,
    pub angle: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn from_samples(samples: Vec<TrajectorySample>) -> Self {
        debug_assert!(!samples.is_empty());
        Self { samples }
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Never true for a trajectory produced by the integrator
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of Euler steps taken
    pub fn steps(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }

    pub fn initial(&self) -> &TrajectorySample {
        &self.samples[0]
    }

    pub fn last(&self) -> &TrajectorySample {
        &self.samples[self.samples.len() - 1]
    }

    /// Final horizontal position
    pub fn range(&self) -> f64 {
        self.last().x
    }

    pub fn time_of_flight(&self) -> f64 {
        self.last().time
    }

    pub fn impact_velocity(&self) -> f64 {
        self.last().velocity
    }

    pub fn max_height(&self) -> f64 {
        self.samples
            .iter()
            .fold(f64::NEG_INFINITY, |acc, s| acc.max(s.y))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    /// Split into the five parallel sequences; all are released together
    /// when the returned value is dropped.
    pub fn into_columns(self) -> TrajectoryColumns {
        let n = self.samples.len();
        let mut columns = TrajectoryColumns {
            time: Vec::with_capacity(n),
            velocity: Vec::with_capacity(n),
            angle: Vec::with_capacity(n),
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        };
        for s in self.samples {
            columns.time.push(s.time);
            columns.velocity.push(s.velocity);
            columns.angle.push(s.angle);
            columns.x.push(s.x);
            columns.y.push(s.y);
        }
        columns
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl TrajectoryColumns {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
