use chrono::{DateTime, Local};
use serde::Serialize;

/// A validated GPS fix.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    /// Metres; 0.0 when the source had no usable elevation.
    pub ele: f64,
    /// `None` when the source timestamp was missing or unparseable.
    pub time: Option<DateTime<Local>>,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ele: 0.0,
            time: None,
        }
    }

    pub fn to_track_point(&self) -> TrackPoint {
        TrackPoint {
            lon: self.lon,
            lat: self.lat,
            ele: self.ele,
        }
    }
}

/// A point handed to the simplifier and the renderers. Time is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub lon: f64,
    pub lat: f64,
    pub ele: f64,
}

impl TrackPoint {
    pub fn new(lon: f64, lat: f64, ele: f64) -> Self {
        Self { lon, lat, ele }
    }
}

/// Output of the pipeline for one input track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedTrack {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub points: Vec<TrackPoint>,
    /// Tolerance actually applied.
    pub epsilon: f64,
    /// Waypoints dropped by validation.
    pub rejected_waypoints: usize,
    /// Number of valid points that went into simplification.
    pub original_points: usize,
}
