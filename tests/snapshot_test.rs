use gpx2kml_wasm::converter::to_feature_collection;
use gpx2kml_wasm::options::ConvertOptions;
use gpx2kml_wasm::simplify_gpx_files;
use std::path::Path;

fn load_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{path}")).unwrap()
}

fn convert(gpx: &str) -> serde_json::Value {
    let opts = ConvertOptions::default();
    let tracks = simplify_gpx_files(&[gpx], &opts).unwrap();
    let fc = to_feature_collection(&tracks, &opts);
    serde_json::to_value(&fc).unwrap()
}

/// Compare actual GeoJSON output against the expected snapshot file.
/// When `UPDATE_SNAPSHOTS=1` is set, write/overwrite the expected file instead.
fn assert_snapshot(actual: &serde_json::Value, expected_path: &str) {
    let path = format!("tests/fixtures/expected/{expected_path}");

    if matches!(std::env::var("UPDATE_SNAPSHOTS").as_deref(), Ok("1")) {
        let dir = Path::new(&path).parent().unwrap();
        std::fs::create_dir_all(dir).unwrap();
        let pretty = serde_json::to_string_pretty(actual).unwrap();
        std::fs::write(&path, pretty.as_bytes()).unwrap();
        eprintln!("Updated snapshot: {path}");
        return;
    }

    let expected_str = std::fs::read_to_string(&path).unwrap_or_else(|_| {
        panic!("Expected file not found: {path}. Run with UPDATE_SNAPSHOTS=1 to generate.")
    });
    let expected: serde_json::Value = serde_json::from_str(&expected_str)
        .unwrap_or_else(|e| panic!("Failed to parse {path}: {e}"));

    assert_eq!(
        *actual, expected,
        "Snapshot mismatch for {path}.\nRun with UPDATE_SNAPSHOTS=1 to update."
    );
}

#[test]
fn snapshot_03_missing_longitude() {
    let actual = convert(&load_fixture("edge_cases/03_missing_longitude.gpx"));
    assert_snapshot(&actual, "edge_cases/03_missing_longitude.geojson");
}

#[test]
fn snapshot_04_empty() {
    let actual = convert(&load_fixture("edge_cases/04_empty.gpx"));
    assert_snapshot(&actual, "edge_cases/04_empty.geojson");
}
