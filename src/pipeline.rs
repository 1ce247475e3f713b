use crate::gpx_types::RawTrack;
use crate::options::SimplificationConfig;
use crate::simplify::douglas_peucker;
use crate::sort::sort_chronologically;
use crate::track::{SimplifiedTrack, TrackPoint};
use crate::validate::validate_all;

/// Validate, sort and simplify one track.
pub fn process_track(raw: &RawTrack, config: &SimplificationConfig) -> SimplifiedTrack {
    let mut validated = validate_all(&raw.waypoints);
    if validated.rejected > 0 {
        tracing::warn!(
            "{} of {} waypoints rejected in track {:?}",
            validated.rejected,
            raw.waypoints.len(),
            raw.name
        );
    }

    sort_chronologically(&mut validated.waypoints);

    let points: Vec<TrackPoint> = validated
        .waypoints
        .iter()
        .map(|wp| wp.to_track_point())
        .collect();
    let simplified = douglas_peucker(&points, config.epsilon);

    tracing::debug!(
        "simplified track {:?}: {} -> {} points (epsilon {})",
        raw.name,
        points.len(),
        simplified.len(),
        config.epsilon
    );

    SimplifiedTrack {
        name: raw.name.clone(),
        desc: raw.desc.clone(),
        points: simplified,
        epsilon: config.epsilon,
        rejected_waypoints: validated.rejected,
        original_points: points.len(),
    }
}

/// Process each track independently, keeping the caller's track order.
pub fn process_tracks(tracks: &[RawTrack], config: &SimplificationConfig) -> Vec<SimplifiedTrack> {
    tracks.iter().map(|t| process_track(t, config)).collect()
}
