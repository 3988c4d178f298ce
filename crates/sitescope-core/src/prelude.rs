//! sitescope prelude: bring common types and functions into scope.

#![allow(unused_imports)]

pub use crate::aggregate::{
    aggregate_by_region, count_by_region, mean_by_region, normalize_records,
    summarize_by_region, AggregateOp,
};
pub use crate::common::DatasetStats;
pub use crate::error::{Result, SiteError};
pub use crate::join::{assign_regions, locate_region, ChoroplethJoin, JoinedRegion};
pub use crate::loader::{load_points, load_points_cached, load_region_table, CsvSchema};
#[cfg(feature = "json")]
pub use crate::loader::{load_boundaries, load_boundaries_cached};
pub use crate::model::{PointRecord, RegionBoundary, RegionSummary};
pub use crate::region::{normalize_region_id, RegionEntry, RegionTable};
pub use crate::traits::{NameMatch, RegionKeyed};
