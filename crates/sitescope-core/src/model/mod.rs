// crates/sitescope-core/src/model/mod.rs
pub mod boundary;
pub mod record;

pub use boundary::RegionBoundary;
pub use record::{PointRecord, RegionSummary};
