// crates/sitescope-core/src/lib.rs

pub mod aggregate; // The core: group-by-region counts and means
pub mod common;
pub mod error;
pub mod join; // Summaries x boundaries
pub mod loader; // The public loaders + dataset cache
pub mod model;
pub mod prelude;
pub mod region; // Canton code table
pub mod text;
pub mod traits;

// Re-exports
pub use crate::error::{Result, SiteError};
pub use aggregate::{
    aggregate_by_region, count_by_region, mean_by_region, normalize_records,
    summarize_by_region, AggregateOp,
};
pub use common::DatasetStats;
pub use join::{ChoroplethJoin, JoinedRegion};
pub use model::{PointRecord, RegionBoundary, RegionSummary};
pub use region::{normalize_region_id, RegionEntry, RegionTable};
pub use traits::{NameMatch, RegionKeyed};
