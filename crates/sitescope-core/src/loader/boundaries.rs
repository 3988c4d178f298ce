// crates/sitescope-core/src/loader/boundaries.rs

// ---------------------------------------------------------------------------
// FILE GUARD: This entire file is skipped if 'json' feature is missing.
// ---------------------------------------------------------------------------
#![cfg(feature = "json")]

use super::common_io;
use crate::error::{Result, SiteError};
use crate::model::RegionBoundary;
use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Loads region boundaries from a GeoJSON FeatureCollection.
///
/// `id_property` names the feature property holding the region id (string or
/// number). Features without that property, without geometry, or with
/// non-polygonal geometry are skipped with a warning.
pub fn load_boundaries(path: impl AsRef<Path>, id_property: &str) -> Result<Vec<RegionBoundary>> {
    let path = path.as_ref();
    let reader = common_io::open_stream(path)?;
    let boundaries = load_boundaries_from_reader(reader, id_property)?;
    info!(
        "Loaded {} region boundaries from {}",
        boundaries.len(),
        path.display()
    );
    Ok(boundaries)
}

pub fn load_boundaries_from_reader<R: Read>(
    reader: R,
    id_property: &str,
) -> Result<Vec<RegionBoundary>> {
    let collection = match GeoJson::from_reader(reader)? {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(SiteError::Unsupported(
                "GeoJSON must be a FeatureCollection".to_string(),
            ))
        }
    };

    let mut boundaries = Vec::new();
    for (n, feature) in collection.features.into_iter().enumerate() {
        let id = match feature
            .properties
            .as_ref()
            .and_then(|props| props.get(id_property))
        {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(num)) => num.to_string(),
            _ => {
                warn!("feature #{n} has no '{id_property}' property, skipped");
                continue;
            }
        };

        let Some(geometry) = feature.geometry else {
            warn!("feature '{id}' has no geometry, skipped");
            continue;
        };

        let geometry: Geometry<f64> =
            geometry
                .value
                .try_into()
                .map_err(|e: geojson::Error| SiteError::InvalidGeometry {
                    region: id.clone(),
                    reason: e.to_string(),
                })?;

        let polygons = match geometry {
            Geometry::MultiPolygon(mp) => mp,
            Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
            _ => {
                warn!("feature '{id}' is not a polygon, skipped");
                continue;
            }
        };

        boundaries.push(RegionBoundary::new(id, polygons));
    }

    Ok(boundaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANTONS: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {"type": "Feature", "id": 1,
         "properties": {"name": "Zürich", "kantonsnummer": 1},
         "geometry": {"type": "Polygon",
           "coordinates": [[[8.0,47.0],[9.0,47.0],[9.0,48.0],[8.0,48.0],[8.0,47.0]]]}},
        {"type": "Feature",
         "properties": {"name": "Bern", "kantonsnummer": 2},
         "geometry": {"type": "MultiPolygon",
           "coordinates": [[[[7.0,46.0],[8.0,46.0],[8.0,47.0],[7.0,47.0],[7.0,46.0]]]]}},
        {"type": "Feature",
         "properties": {"name": "Capital marker"},
         "geometry": {"type": "Point", "coordinates": [7.44, 46.95]}},
        {"type": "Feature",
         "properties": {},
         "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}
      ]
    }"#;

    #[test]
    fn keeps_polygon_features() {
        let boundaries = load_boundaries_from_reader(CANTONS.as_bytes(), "name").unwrap();
        let ids: Vec<&str> = boundaries.iter().map(|b| b.region_id.as_str()).collect();
        assert_eq!(ids, vec!["Zürich", "Bern"]);
        assert!(boundaries[1].contains(46.95, 7.44));
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let boundaries = load_boundaries_from_reader(CANTONS.as_bytes(), "kantonsnummer").unwrap();
        let ids: Vec<&str> = boundaries.iter().map(|b| b.region_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn rejects_bare_geometry() {
        let point = r#"{"type": "Point", "coordinates": [8.5, 47.4]}"#;
        let err = load_boundaries_from_reader(point.as_bytes(), "name").unwrap_err();
        assert!(matches!(err, SiteError::Unsupported(_)));
    }
}
