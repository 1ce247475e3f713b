pub mod converter;
pub mod error;
pub mod gpx_types;
pub mod kml;
pub mod options;
pub mod parser;
pub mod pipeline;
pub mod simplify;
pub mod sort;
pub mod track;
pub mod validate;

use wasm_bindgen::prelude::*;

use crate::error::Gpx2KmlError;
use crate::options::ConvertOptions;
use crate::track::SimplifiedTrack;

/// Parse and simplify each GPX document, one track per document, in order.
pub fn simplify_gpx_files<S: AsRef<str>>(
    gpx_files: &[S],
    opts: &ConvertOptions,
) -> Result<Vec<SimplifiedTrack>, Gpx2KmlError> {
    let config = opts.simplification();
    let raw = gpx_files
        .iter()
        .map(|gpx| parser::parse_gpx(gpx.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pipeline::process_tracks(&raw, &config))
}

/// Simplify GPX documents and return the tracks as JS objects.
#[wasm_bindgen(js_name = simplifyTracks)]
pub fn simplify_tracks(gpx_files: Vec<String>, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let tracks = simplify_gpx_files(&gpx_files, &opts)?;
    serde_wasm_bindgen::to_value(&tracks).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Simplify GPX documents and render them into one KML document.
#[wasm_bindgen(js_name = gpxToKml)]
pub fn gpx_to_kml(gpx_files: Vec<String>, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let tracks = simplify_gpx_files(&gpx_files, &opts)?;
    Ok(kml::render_kml(&tracks)?)
}

/// Simplify GPX documents and return GeoJSON as a JS object.
#[wasm_bindgen(js_name = gpxToGeoJson)]
pub fn gpx_to_geojson(gpx_files: Vec<String>, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let tracks = simplify_gpx_files(&gpx_files, &opts)?;
    let fc = converter::to_feature_collection(&tracks, &opts);
    serde_wasm_bindgen::to_value(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Simplify GPX documents and return GeoJSON as a JSON string.
#[wasm_bindgen(js_name = gpxToGeoJsonString)]
pub fn gpx_to_geojson_string(gpx_files: Vec<String>, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let tracks = simplify_gpx_files(&gpx_files, &opts)?;
    let fc = converter::to_feature_collection(&tracks, &opts);
    serde_json::to_string(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<ConvertOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ConvertOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
