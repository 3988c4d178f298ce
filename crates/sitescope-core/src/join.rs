// crates/sitescope-core/src/join.rs

//! Choropleth join: per-region summaries x boundary geometry.
//!
//! The join is a lookup by region id. Summaries whose region has no boundary
//! are kept in [`ChoroplethJoin::unmatched`] instead of being dropped, so the
//! caller can surface them.

use crate::model::{PointRecord, RegionBoundary, RegionSummary};
use crate::traits::RegionKeyed;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A summary paired with the geometry it will be drawn on.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRegion<'a> {
    pub summary: &'a RegionSummary,
    pub boundary: &'a RegionBoundary,
}

#[derive(Debug, Clone, Default)]
pub struct ChoroplethJoin<'a> {
    /// In summary order.
    pub matched: Vec<JoinedRegion<'a>>,
    /// Summaries with no boundary of the same region id.
    pub unmatched: Vec<&'a RegionSummary>,
    /// Boundaries no summary refers to (regions with zero points).
    pub uncovered: Vec<&'a RegionBoundary>,
}

impl<'a> ChoroplethJoin<'a> {
    pub fn build(summaries: &'a [RegionSummary], boundaries: &'a [RegionBoundary]) -> Self {
        let by_id: HashMap<&str, &RegionBoundary> =
            boundaries.iter().map(|b| (b.region_id(), b)).collect();

        let mut join = ChoroplethJoin::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for summary in summaries {
            match by_id.get(summary.region_id()) {
                Some(&boundary) => {
                    seen.insert(boundary.region_id());
                    join.matched.push(JoinedRegion { summary, boundary });
                }
                None => join.unmatched.push(summary),
            }
        }

        join.uncovered = boundaries
            .iter()
            .filter(|b| !seen.contains(b.region_id()))
            .collect();

        if !join.unmatched.is_empty() {
            let ids: Vec<&str> = join.unmatched.iter().map(|s| s.region_id()).collect();
            let points: usize = join.unmatched.iter().map(|s| s.count).sum();
            warn!(
                "{} region(s) covering {} record(s) have no boundary: {}",
                ids.len(),
                points,
                ids.join(", ")
            );
        }
        debug!(
            "choropleth join: {} matched, {} unmatched, {} uncovered",
            join.matched.len(),
            join.unmatched.len(),
            join.uncovered.len()
        );
        join
    }

    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// The first boundary containing the point, if any.
pub fn locate_region(
    boundaries: &[RegionBoundary],
    latitude: f64,
    longitude: f64,
) -> Option<&RegionBoundary> {
    boundaries.iter().find(|b| b.contains(latitude, longitude))
}

/// Fills empty region ids by point-in-polygon lookup against `boundaries`.
///
/// Records that already carry a region id, or that fall outside every
/// boundary, are returned unchanged.
pub fn assign_regions(records: &[PointRecord], boundaries: &[RegionBoundary]) -> Vec<PointRecord> {
    let mut located = 0usize;
    let out = records
        .iter()
        .map(|r| {
            if !r.region_id.is_empty() {
                return r.clone();
            }
            match locate_region(boundaries, r.latitude, r.longitude) {
                Some(b) => {
                    located += 1;
                    PointRecord {
                        region_id: b.region_id.clone(),
                        ..r.clone()
                    }
                }
                None => r.clone(),
            }
        })
        .collect();
    debug!("assigned {located} record(s) to a region by location");
    out
}
