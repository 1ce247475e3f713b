use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::error::WaypointError;
use crate::gpx_types::RawWaypoint;
use crate::track::Waypoint;

/// Waypoints that passed validation, plus how many did not.
#[derive(Debug, Default)]
pub struct Validated {
    pub waypoints: Vec<Waypoint>,
    pub rejected: usize,
}

/// Turn a raw record into a `Waypoint`.
///
/// Only latitude and longitude are required. Elevation falls back to 0.0 and
/// the timestamp to `None` when either is missing or unreadable.
pub fn validate_waypoint(raw: &RawWaypoint) -> Result<Waypoint, WaypointError> {
    let lat = parse_coordinate("lat", raw.lat.as_deref())?;
    let lon = parse_coordinate("lon", raw.lon.as_deref())?;

    let ele = raw
        .ele
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|e| e.is_finite())
        .unwrap_or(0.0);
    let time = raw.time.as_deref().and_then(parse_timestamp);

    Ok(Waypoint {
        lat,
        lon,
        ele,
        time,
    })
}

pub fn is_valid(raw: &RawWaypoint) -> bool {
    validate_waypoint(raw).is_ok()
}

/// Validate every record, keeping survivors in input order.
pub fn validate_all(raw: &[RawWaypoint]) -> Validated {
    let mut out = Validated {
        waypoints: Vec::with_capacity(raw.len()),
        rejected: 0,
    };

    for wp in raw {
        match validate_waypoint(wp) {
            Ok(valid) => out.waypoints.push(valid),
            Err(e) => {
                tracing::debug!("dropping waypoint: {e}");
                out.rejected += 1;
            }
        }
    }

    out
}

fn parse_coordinate(field: &'static str, value: Option<&str>) -> Result<f64, WaypointError> {
    let text = value.ok_or(WaypointError::Missing { field })?;
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(WaypointError::NotNumeric {
            field,
            value: text.to_string(),
        }),
    }
}

/// Parse a GPX `<time>` value as UTC and convert it to local time.
///
/// `YYYY-MM-DDTHH:MM:SSZ` is the expected shape; any other RFC 3339 form
/// (fractional seconds, explicit offsets) is accepted as well.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Local>> {
    let text = text.trim();

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%SZ") {
        return Some(naive.and_utc().with_timezone(&Local));
    }

    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).with_timezone(&Local))
}
