/// One GPX track as read from a file, before any validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrack {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub waypoints: Vec<RawWaypoint>,
}

/// Raw field text of a single `<trkpt>`.
///
/// Nothing here has been checked yet: `lat`/`lon` may be missing or
/// non-numeric, and `time` may be in any format the file happens to use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWaypoint {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub ele: Option<String>,
    pub time: Option<String>,
}

impl RawWaypoint {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: Some(lat.into()),
            lon: Some(lon.into()),
            ele: None,
            time: None,
        }
    }

    pub fn with_ele(mut self, ele: impl Into<String>) -> Self {
        self.ele = Some(ele.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}
