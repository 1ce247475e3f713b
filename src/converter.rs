use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::options::ConvertOptions;
use crate::track::{SimplifiedTrack, TrackPoint};

/// Convert simplified tracks to a GeoJSON FeatureCollection.
///
/// Each track with two or more points becomes a LineString Feature, a
/// single-point track becomes a Point Feature, and empty tracks are dropped.
pub fn to_feature_collection(
    tracks: &[SimplifiedTrack],
    opts: &ConvertOptions,
) -> FeatureCollection {
    let features = tracks
        .iter()
        .filter_map(|trk| track_to_feature(trk, opts))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn track_to_feature(trk: &SimplifiedTrack, opts: &ConvertOptions) -> Option<Feature> {
    let value = match trk.points.as_slice() {
        [] => return None,
        [pt] => Value::Point(point_coords(pt, opts.include_elevation)),
        points => Value::LineString(
            points
                .iter()
                .map(|pt| point_coords(pt, opts.include_elevation))
                .collect(),
        ),
    };

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(build_track_props(trk, opts)),
        foreign_members: None,
    })
}

fn build_track_props(trk: &SimplifiedTrack, opts: &ConvertOptions) -> Map<String, JsonValue> {
    let mut props = Map::new();

    if opts.include_metadata {
        insert_optional(&mut props, "name", &trk.name);
        insert_optional(&mut props, "desc", &trk.desc);
    }

    props.insert(
        "epsilon".to_string(),
        serde_json::Number::from_f64(trk.epsilon)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
    );
    props.insert(
        "rejectedWaypoints".to_string(),
        JsonValue::Number(trk.rejected_waypoints.into()),
    );
    props.insert(
        "originalPoints".to_string(),
        JsonValue::Number(trk.original_points.into()),
    );
    props.insert(
        "simplifiedPoints".to_string(),
        JsonValue::Number(trk.points.len().into()),
    );

    props
}

/// Build [lon, lat] or [lon, lat, ele] coordinate array.
fn point_coords(pt: &TrackPoint, include_elevation: bool) -> Vec<f64> {
    if include_elevation {
        vec![pt.lon, pt.lat, pt.ele]
    } else {
        vec![pt.lon, pt.lat]
    }
}

fn insert_optional(props: &mut Map<String, JsonValue>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        props.insert(key.to_string(), JsonValue::String(v.clone()));
    }
}
