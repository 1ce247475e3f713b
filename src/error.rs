use std::string::FromUtf8Error;
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum Gpx2KmlError {
    XmlParse(quick_xml::Error),
    XmlWrite(std::io::Error),
    Utf8(FromUtf8Error),
}

impl std::fmt::Display for Gpx2KmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::XmlParse(e) => write!(f, "XML parse error: {e}"),
            Self::XmlWrite(e) => write!(f, "KML write error: {e}"),
            Self::Utf8(e) => write!(f, "KML output is not valid UTF-8: {e}"),
        }
    }
}

impl std::error::Error for Gpx2KmlError {}

impl From<quick_xml::Error> for Gpx2KmlError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlParse(e)
    }
}

impl From<std::io::Error> for Gpx2KmlError {
    fn from(e: std::io::Error) -> Self {
        Self::XmlWrite(e)
    }
}

impl From<FromUtf8Error> for Gpx2KmlError {
    fn from(e: FromUtf8Error) -> Self {
        Self::Utf8(e)
    }
}

impl From<Gpx2KmlError> for JsValue {
    fn from(e: Gpx2KmlError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Why a raw waypoint was rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaypointError {
    Missing { field: &'static str },
    NotNumeric { field: &'static str, value: String },
}

impl std::fmt::Display for WaypointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "Missing '{field}' on waypoint"),
            Self::NotNumeric { field, value } => {
                write!(f, "Invalid value '{value}' for '{field}' on waypoint")
            }
        }
    }
}

impl std::error::Error for WaypointError {}
