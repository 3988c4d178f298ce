// crates/sitescope-core/src/model/boundary.rs
use crate::traits::RegionKeyed;
use geo::{BoundingRect, Contains, MultiPolygon, Point, Rect};

/// Boundary geometry of one region, as read from the geographic reference
/// file. Coordinates are `x = longitude`, `y = latitude`.
#[derive(Clone, Debug)]
pub struct RegionBoundary {
    pub region_id: String,
    pub geometry: MultiPolygon<f64>,
    bbox: Option<Rect<f64>>,
}

impl RegionBoundary {
    pub fn new(region_id: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        let bbox = geometry.bounding_rect();
        Self {
            region_id: region_id.into(),
            geometry,
            bbox,
        }
    }

    /// Point-in-polygon test. The bounding box is checked first.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let pt = Point::new(longitude, latitude);
        match self.bbox {
            Some(bbox) if bbox.contains(&pt) => self.geometry.contains(&pt),
            _ => false,
        }
    }
}

impl RegionKeyed for RegionBoundary {
    fn region_id(&self) -> &str {
        &self.region_id
    }
}
