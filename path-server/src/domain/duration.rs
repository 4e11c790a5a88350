//! Travel time estimates from hop counts and line frequency.

use super::Segment;

/// Assumed running time between adjacent stations.
pub const MINUTES_PER_HOP: f64 = 2.0;

/// Flat allowance for changing trains.
pub const TRANSFER_MINUTES: f64 = 3.0;

/// Estimated minutes for one segment: running time plus the expected wait,
/// which is half the line's frequency for uniformly random arrival.
pub fn segment_minutes(segment: &Segment) -> f64 {
    let travel = segment.hops() as f64 * MINUTES_PER_HOP;
    let wait = segment.frequency_mins / 2.0;
    travel + wait
}

/// Estimated minutes for a whole route, rounded to the nearest minute.
///
/// Adds [`TRANSFER_MINUTES`] when the route has more than one segment.
pub fn estimate_duration(segments: &[Segment]) -> u32 {
    let mut total: f64 = segments.iter().map(segment_minutes).sum();
    if segments.len() > 1 {
        total += TRANSFER_MINUTES;
    }
    total.round().max(0.0) as u32
}
