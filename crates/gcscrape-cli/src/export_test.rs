use chrono::NaiveDate;
use gcscrape_core::{ContainerType, GeocacheType};

use super::*;

fn make_record(code: &str) -> CacheRecord {
    CacheRecord {
        cache_id: 77,
        cache_code: code.to_owned(),
        name: "Bench, by the pond".to_owned(),
        geocache_type: GeocacheType::Mystery,
        container_type: ContainerType::Small,
        difficulty: 2.5,
        terrain: 1.5,
        favorite_points: 4,
        trackable_count: 1,
        latitude: 1.3521,
        longitude: 103.8198,
        region: "BISHAN".to_owned(),
        owner_id: "PR1".to_owned(),
        owner_name: "owner".to_owned(),
        placed_date: NaiveDate::from_ymd_opt(2018, 3, 9).unwrap(),
        last_found_date: None,
        last_found_time: None,
        details_url: format!("https://www.geocaching.com/geocache/{code}"),
        description: Some("Near the pond.".to_owned()),
        hint: Some("cps is hard".to_owned()),
        total_found: Some(1234),
        total_did_not_find: Some(56),
        found_rate: Some(96),
    }
}

fn csv_string(records: &[CacheRecord]) -> String {
    let mut buf = Vec::new();
    write_csv(&mut buf, records).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn csv_header_has_fixed_column_order() {
    let out = csv_string(&[make_record("GC1")]);
    let header = out.lines().next().unwrap();
    assert_eq!(header, COLUMNS.join(","));
}

#[test]
fn csv_empty_record_set_still_has_header() {
    let out = csv_string(&[]);
    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("cache_id,cache_code,"));
}

#[test]
fn csv_row_per_record_with_labels_and_blank_options() {
    let out = csv_string(&[make_record("GC1"), make_record("GC2")]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("77,GC1,\"Bench, by the pond\",mystery,small,2.5,1.5,4,1,"));
    assert!(lines[1].contains(",BISHAN,PR1,owner,2018-03-09,,,https://"));
    assert!(lines[1].ends_with(",Near the pond.,cps is hard,1234,56,96"));
    assert!(lines[2].contains(",GC2,"));
}

#[test]
fn csv_header_matches_record_field_names() {
    let value = serde_json::to_value(make_record("GC1")).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    let mut expected = COLUMNS.to_vec();
    let mut actual = keys;
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(actual, expected);
}

#[test]
fn json_is_array_of_objects_with_record_fields() {
    let mut buf = Vec::new();
    write_json(&mut buf, &[make_record("GC1")]).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["cache_code"], "GC1");
    assert_eq!(rows[0]["geocache_type"], "mystery");
    assert_eq!(rows[0]["placed_date"], "2018-03-09");
    assert!(rows[0]["last_found_date"].is_null());
    assert_eq!(rows[0]["found_rate"], 96);
}

#[test]
fn json_empty_record_set_is_empty_array() {
    let mut buf = Vec::new();
    write_json(&mut buf, &[]).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn output_path_appends_extension() {
    assert_eq!(
        output_path(Path::new("out/sg_geocaches"), "csv"),
        PathBuf::from("out/sg_geocaches.csv")
    );
    assert_eq!(
        output_path(Path::new("run.2024"), "json"),
        PathBuf::from("run.2024.json")
    );
}

#[test]
fn export_records_respects_format() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("caches");
    let records = [make_record("GC1")];

    let csv_only = export_records(&records, &stem, ExportFormat::Csv).unwrap();
    assert_eq!(csv_only, [dir.path().join("caches.csv")]);
    assert!(!dir.path().join("caches.json").exists());

    let both = export_records(&records, &stem, ExportFormat::Both).unwrap();
    assert_eq!(
        both,
        [dir.path().join("caches.csv"), dir.path().join("caches.json")]
    );
    assert!(dir.path().join("caches.json").exists());
    assert!(!dir.path().join("caches.csv.partial").exists());
    assert!(!dir.path().join("caches.json.partial").exists());
}

#[test]
fn failed_json_write_leaves_no_csv_behind() {
    let dir = tempfile::tempdir().unwrap();
    let stem = dir.path().join("caches");
    // A directory where the JSON file should go makes the final rename fail.
    std::fs::create_dir(dir.path().join("caches.json")).unwrap();

    let err = export_records(&[make_record("GC1")], &stem, ExportFormat::Both).unwrap_err();

    assert!(err.to_string().contains("caches.json"), "got: {err:#}");
    assert!(!dir.path().join("caches.csv").exists());
    assert!(!dir.path().join("caches.csv.partial").exists());
    assert!(!dir.path().join("caches.json.partial").exists());
}

#[test]
fn export_records_reports_unwritable_path() {
    let stem = Path::new("/nonexistent-dir/gcscrape/caches");
    let err = export_records(&[], stem, ExportFormat::Json).unwrap_err();
    assert!(err.to_string().contains("caches.json"), "got: {err:#}");
}
