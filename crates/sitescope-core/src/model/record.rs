// crates/sitescope-core/src/model/record.rs
use crate::traits::RegionKeyed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single geolocated observation (one store, one density sample, ...).
///
/// Records are immutable once loaded; normalization produces new records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Canton code or full name, depending on the source file.
    pub region_id: String,
    /// Numeric attributes keyed by column name (e.g. `"rating"`).
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PointRecord {
    pub fn new(region_id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            region_id: region_id.into(),
            attributes: BTreeMap::new(),
            latitude,
            longitude,
        }
    }

    /// Builder-style helper used by loaders and tests.
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).copied()
    }
}

impl RegionKeyed for PointRecord {
    fn region_id(&self) -> &str {
        &self.region_id
    }
}

/// Per-region summary handed to the rendering layer.
///
/// `aggregates` only holds values that are defined for the region: an
/// attribute no record of the region carries is absent, not zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region_id: String,
    pub count: usize,
    #[serde(default)]
    pub aggregates: BTreeMap<String, f64>,
}

impl RegionSummary {
    pub fn new(region_id: impl Into<String>) -> Self {
        Self {
            region_id: region_id.into(),
            count: 0,
            aggregates: BTreeMap::new(),
        }
    }

    pub fn aggregate(&self, name: &str) -> Option<f64> {
        self.aggregates.get(name).copied()
    }
}

impl RegionKeyed for RegionSummary {
    fn region_id(&self) -> &str {
        &self.region_id
    }
}
