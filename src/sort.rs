use crate::track::Waypoint;

/// Order waypoints by timestamp, oldest first.
///
/// The sort is stable, so waypoints sharing a timestamp keep their input
/// order. Waypoints without a timestamp sort before all timed ones.
pub fn sort_chronologically(waypoints: &mut [Waypoint]) {
    // Option<T>: None < Some(_)
    waypoints.sort_by_key(|wp| wp.time);
}
