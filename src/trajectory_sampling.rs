use crate::trajectory::{Trajectory, TrajectorySample};

/// `count` evenly spaced indices over `0..len`, first and last included.
///
/// Positions are truncated toward zero, so indices can repeat when `count`
/// exceeds `len`.
pub fn sample_indices(len: usize, count: usize) -> Vec<usize> {
    if len == 0 || count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![0];
    }
    let last = (len - 1) as f64;
    let step = last / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                len - 1
            } else {
                ((i as f64 * step) as usize).min(len - 1)
            }
        })
        .collect()
}

/// Reduce a trajectory to `count` evenly spaced samples for display
pub fn downsample(trajectory: &Trajectory, count: usize) -> Vec<TrajectorySample> {
    let samples = trajectory.samples();
    sample_indices(samples.len(), count)
        .into_iter()
        .map(|i| samples[i])
        .collect()
}

/// Height at horizontal distance `x`, linearly interpolated between the two
/// samples that straddle it. `None` if the trajectory never reaches `x`.
pub fn height_at_distance(trajectory: &Trajectory, x: f64) -> Option<f64> {
    let samples = trajectory.samples();
    let i = samples.iter().position(|s| s.x >= x)?;
    if i == 0 {
        return Some(samples[0].y);
    }
    let p1 = &samples[i - 1];
    let p2 = &samples[i];
    let dx = p2.x - p1.x;
    if dx.abs() < f64::EPSILON {
        return Some(p2.y);
    }
    let t = (x - p1.x) / dx;
    Some(p1.y + t * (p2.y - p1.y))
}
