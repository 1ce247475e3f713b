//! Douglas-Peucker polyline simplification.
//!
//! Distances are measured in the raw coordinate plane, with latitude on the x
//! axis and longitude on the y axis. Units are degrees; no projection is
//! applied.

use crate::track::TrackPoint;

/// Tolerance used when the caller does not supply one.
pub const DEFAULT_EPSILON: f64 = 1e-7;

/// Distance from `point` to the infinite line through `start` and `end`.
///
/// When `start` and `end` coincide there is no line, and the straight-line
/// distance from `point` to `start` is returned instead.
pub fn perpendicular_distance(point: &TrackPoint, start: &TrackPoint, end: &TrackPoint) -> f64 {
    let (px, py) = (point.lat, point.lon);
    let (ax, ay) = (start.lat, start.lon);
    let (bx, by) = (end.lat, end.lon);

    let dx = bx - ax;
    let dy = by - ay;
    let scale = dx.abs().max(dy.abs());

    if scale == 0.0 {
        return (px - ax).hypot(py - ay);
    }

    // unit-scaled direction keeps the products finite for huge coordinates
    let (ux, uy) = (dx / scale, dy / scale);
    (ux * (ay - py) - (ax - px) * uy).abs() / ux.hypot(uy)
}

/// Reduce `points` to the subset needed to stay within `epsilon` of the
/// original shape.
///
/// The first and last points are always kept and the output preserves input
/// order. Inputs with fewer than two points come back unchanged.
pub fn douglas_peucker(points: &[TrackPoint], epsilon: f64) -> Vec<TrackPoint> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    match farthest_interior(points, &first, &last) {
        Some((index, dmax)) if dmax >= epsilon => {
            // index is strictly interior, so both halves are shorter than `points`
            let mut head = douglas_peucker(&points[..=index], epsilon);
            let tail = douglas_peucker(&points[index..], epsilon);
            head.pop();
            head.extend(tail);
            head
        }
        _ => vec![first, last],
    }
}

/// Index and distance of the interior point farthest from the chord.
/// Ties go to the lowest index. A NaN distance counts as infinitely far.
fn farthest_interior(
    points: &[TrackPoint],
    first: &TrackPoint,
    last: &TrackPoint,
) -> Option<(usize, f64)> {
    let mut farthest: Option<(usize, f64)> = None;

    for (i, point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let mut d = perpendicular_distance(point, first, last);
        if d.is_nan() {
            // coordinate differences overflowed; keep the point rather than lose it
            tracing::warn!("distance of point {i} is not a number, keeping it");
            d = f64::INFINITY;
        }
        if farthest.is_none_or(|(_, dmax)| d > dmax) {
            farthest = Some((i, d));
        }
    }

    farthest
}
