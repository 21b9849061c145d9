use chrono::NaiveDate;
use gcscrape_core::{ContainerType, GeocacheType};
use serde_json::json;

use super::*;

/// Square ring from (lon0, lat0) to (lon1, lat1), with an altitude component
/// as in the planning-area export.
fn square(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> serde_json::Value {
    json!([[
        [lon0, lat0, 0.0],
        [lon1, lat0, 0.0],
        [lon1, lat1, 0.0],
        [lon0, lat1, 0.0],
        [lon0, lat0, 0.0]
    ]])
}

fn fixture() -> String {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "PLN_AREA_N": "BEDOK" },
                "geometry": { "type": "Polygon", "coordinates": square(103.90, 1.30, 103.95, 1.35) }
            },
            {
                "type": "Feature",
                "properties": { "PLN_AREA_N": "JURONG WEST" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        square(103.68, 1.33, 103.72, 1.36),
                        square(103.60, 1.20, 103.62, 1.22)
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "PLN_AREA_N": "MARKER" },
                "geometry": { "type": "Point", "coordinates": [103.8, 1.3] }
            }
        ]
    })
    .to_string()
}

fn regions() -> RegionSet {
    RegionSet::from_geojson_str(&fixture(), "PLN_AREA_N").unwrap()
}

fn record_at(latitude: f64, longitude: f64) -> CacheRecord {
    CacheRecord {
        cache_id: 1,
        cache_code: "GC1".to_owned(),
        name: "Test".to_owned(),
        geocache_type: GeocacheType::Traditional,
        container_type: ContainerType::Micro,
        difficulty: 1.0,
        terrain: 1.0,
        favorite_points: 0,
        trackable_count: 0,
        latitude,
        longitude,
        region: NO_REGION.to_owned(),
        owner_id: "PR1".to_owned(),
        owner_name: "owner".to_owned(),
        placed_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        last_found_date: None,
        last_found_time: None,
        details_url: String::new(),
        description: None,
        hint: None,
        total_found: None,
        total_did_not_find: None,
        found_rate: None,
    }
}

#[test]
fn loads_polygon_features_and_skips_others() {
    let set = regions();
    assert_eq!(set.len(), 2);
    let names: Vec<&str> = set.polygons().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["BEDOK", "JURONG WEST"]);
}

#[test]
fn resolves_point_inside_polygon() {
    let set = regions();
    assert_eq!(resolve_region(&record_at(1.32, 103.92), set.polygons()), "BEDOK");
}

#[test]
fn resolves_point_inside_any_part_of_multipolygon() {
    let set = regions();
    assert_eq!(resolve_region(&record_at(1.34, 103.70), set.polygons()), "JURONG WEST");
    assert_eq!(resolve_region(&record_at(1.21, 103.61), set.polygons()), "JURONG WEST");
}

#[test]
fn point_outside_every_polygon_is_nil() {
    // Johor Bahru, across the strait.
    let set = regions();
    assert_eq!(resolve_region(&record_at(1.46, 103.76), set.polygons()), NO_REGION);
}

#[test]
fn swapped_coordinates_do_not_match() {
    // Latitude and longitude swapped lands nowhere near Singapore.
    let set = regions();
    assert_eq!(resolve_region(&record_at(103.92, 1.32), set.polygons()), NO_REGION);
}

#[test]
fn point_on_boundary_is_not_contained() {
    let set = regions();
    assert_eq!(resolve_region(&record_at(1.30, 103.92), set.polygons()), NO_REGION);
}

#[test]
fn first_polygon_in_file_order_wins_on_overlap() {
    let overlapping = json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "PLN_AREA_N": "FIRST" },
              "geometry": { "type": "Polygon", "coordinates": square(0.0, 0.0, 2.0, 2.0) } },
            { "type": "Feature", "properties": { "PLN_AREA_N": "SECOND" },
              "geometry": { "type": "Polygon", "coordinates": square(1.0, 1.0, 3.0, 3.0) } }
        ]
    })
    .to_string();
    let set = RegionSet::from_geojson_str(&overlapping, "PLN_AREA_N").unwrap();
    assert_eq!(resolve_region(&record_at(1.5, 1.5), set.polygons()), "FIRST");
    assert_eq!(resolve_region(&record_at(2.5, 2.5), set.polygons()), "SECOND");
}

#[test]
fn resolve_region_is_deterministic() {
    let set = regions();
    let record = record_at(1.34, 103.70);
    let first = resolve_region(&record, set.polygons());
    for _ in 0..10 {
        assert_eq!(resolve_region(&record, set.polygons()), first);
    }
}

#[test]
fn resolved_names_come_from_loaded_set() {
    let set = regions();
    let names: Vec<&str> = set.polygons().iter().map(|p| p.name.as_str()).collect();
    for (lat, lon) in [(1.32, 103.92), (1.34, 103.70), (1.46, 103.76), (0.0, 0.0)] {
        let region = resolve_region(&record_at(lat, lon), set.polygons());
        assert!(region == NO_REGION || names.contains(&region.as_str()));
    }
}

#[test]
fn empty_polygon_set_resolves_everything_to_nil() {
    assert_eq!(resolve_region(&record_at(1.32, 103.92), &[]), NO_REGION);
    assert!(RegionSet::default().is_empty());
}

#[test]
fn missing_name_property_is_an_error() {
    let err = RegionSet::from_geojson_str(&fixture(), "REGION_N").unwrap_err();
    assert!(
        matches!(err, ScraperError::Geometry { ref reason } if reason.contains("REGION_N")),
        "expected Geometry error, got: {err:?}"
    );
}

#[test]
fn collection_without_polygons_is_an_error() {
    let only_points = json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "PLN_AREA_N": "X" },
              "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } }
        ]
    })
    .to_string();
    let err = RegionSet::from_geojson_str(&only_points, "PLN_AREA_N").unwrap_err();
    assert!(matches!(err, ScraperError::Geometry { .. }), "got: {err:?}");
}

#[test]
fn short_ring_is_an_error() {
    let bad = json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "PLN_AREA_N": "X" },
              "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]] } }
        ]
    })
    .to_string();
    let err = RegionSet::from_geojson_str(&bad, "PLN_AREA_N").unwrap_err();
    assert!(
        matches!(err, ScraperError::Geometry { ref reason } if reason.contains("at least 4")),
        "got: {err:?}"
    );
}

#[test]
fn non_geojson_text_is_an_error() {
    let err = RegionSet::from_geojson_str("[]", "PLN_AREA_N").unwrap_err();
    assert!(matches!(err, ScraperError::Geometry { .. }), "got: {err:?}");
}

#[test]
fn load_reports_missing_file() {
    let err = RegionSet::load(Path::new("/nonexistent/map.geojson"), "PLN_AREA_N").unwrap_err();
    assert!(
        matches!(err, ScraperError::GeometryIo { ref path, .. } if path.contains("map.geojson")),
        "got: {err:?}"
    );
}
