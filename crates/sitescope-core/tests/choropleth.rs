#![cfg(feature = "json")]

use sitescope_core::loader::load_boundaries_from_reader;
use sitescope_core::prelude::*;

const BOUNDARIES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"name": "Zürich"},
     "geometry": {"type": "Polygon",
       "coordinates": [[[8.3,47.1],[8.9,47.1],[8.9,47.7],[8.3,47.7],[8.3,47.1]]]}},
    {"type": "Feature", "properties": {"name": "Bern"},
     "geometry": {"type": "Polygon",
       "coordinates": [[[7.0,46.3],[8.2,46.3],[8.2,47.3],[7.0,47.3],[7.0,46.3]]]}},
    {"type": "Feature", "properties": {"name": "Ticino"},
     "geometry": {"type": "Polygon",
       "coordinates": [[[8.4,45.8],[9.2,45.8],[9.2,46.6],[8.4,46.6],[8.4,45.8]]]}}
  ]
}"#;

#[test]
fn normalized_codes_join_with_named_boundaries() {
    let boundaries = load_boundaries_from_reader(BOUNDARIES.as_bytes(), "name").unwrap();
    let raw = vec![
        PointRecord::new("ZH", 47.37, 8.54),
        PointRecord::new("Zürich", 47.41, 8.54),
        PointRecord::new("BE", 46.95, 7.45),
        PointRecord::new("XX", 45.0, 7.0),
    ];
    let records = normalize_records(&raw, RegionTable::swiss_cantons());
    let summaries = count_by_region(&records);

    let join = ChoroplethJoin::build(&summaries, &boundaries);
    let matched: Vec<(&str, usize)> = join
        .matched
        .iter()
        .map(|j| (j.boundary.region_id.as_str(), j.summary.count))
        .collect();
    assert_eq!(matched, vec![("Zürich", 2), ("Bern", 1)]);

    let unmatched: Vec<&str> = join.unmatched.iter().map(|s| s.region_id.as_str()).collect();
    assert_eq!(unmatched, vec!["XX"]);
    assert_eq!(join.uncovered.len(), 1);
}

#[test]
fn unlabeled_points_are_located() {
    let boundaries = load_boundaries_from_reader(BOUNDARIES.as_bytes(), "name").unwrap();
    let raw = vec![
        PointRecord::new("", 46.0, 8.95),
        PointRecord::new("", 47.37, 8.54),
    ];
    let located = assign_regions(&raw, &boundaries);
    let counts = count_by_region(&located);
    let ids: Vec<&str> = counts.iter().map(|s| s.region_id.as_str()).collect();
    assert_eq!(ids, vec!["Ticino", "Zürich"]);
    assert!(locate_region(&boundaries, 0.0, 0.0).is_none());
}
