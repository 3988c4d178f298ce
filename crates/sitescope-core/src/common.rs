use crate::model::PointRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Simple aggregate statistics for a loaded dataset.
///
/// These counts reflect the records after region normalization, so `regions`
/// counts canton names rather than the mix of codes and names a raw file may
/// contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub records: usize,
    pub regions: usize,
}

impl DatasetStats {
    pub fn of(records: &[PointRecord]) -> Self {
        let regions: HashSet<&str> = records.iter().map(|r| r.region_id.as_str()).collect();
        Self {
            records: records.len(),
            regions: regions.len(),
        }
    }
}
