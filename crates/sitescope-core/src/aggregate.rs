// crates/sitescope-core/src/aggregate.rs

//! # Regional Aggregator
//!
//! Turns point-level records into one [`RegionSummary`] per region.
//! Everything here is pure: no I/O, no shared state.
//!
//! Output order is the order in which each region first appears in the
//! input. Regions without records are never emitted.

use crate::error::{Result, SiteError};
use crate::model::{PointRecord, RegionSummary};
use crate::region::{normalize_region_id, RegionTable};
use crate::traits::RegionKeyed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Statistic computed over one attribute within a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Mean,
    Sum,
    Min,
    Max,
}

impl AggregateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Mean => "mean",
            AggregateOp::Sum => "sum",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateOp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" | "avg" => Ok(AggregateOp::Mean),
            "sum" => Ok(AggregateOp::Sum),
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            other => Err(format!("unknown aggregate '{other}' (expected mean, sum, min or max)")),
        }
    }
}

/// Values of one attribute inside one group, sorted with `f64::total_cmp`.
///
/// Summing in sorted order makes every statistic a function of the multiset
/// of values, so reordering the input records never changes a result.
#[derive(Debug, Default, Clone)]
struct GroupValues {
    sorted: Vec<f64>,
}

impl GroupValues {
    fn collect(members: &[&PointRecord], attribute: &str) -> Self {
        let mut sorted: Vec<f64> = members
            .iter()
            .filter_map(|r| r.attribute(attribute))
            .collect();
        sorted.sort_by(f64::total_cmp);
        Self { sorted }
    }

    fn finish(&self, op: AggregateOp) -> Option<f64> {
        let first = *self.sorted.first()?;
        let last = *self.sorted.last()?;
        let sum: f64 = self.sorted.iter().sum();
        Some(match op {
            AggregateOp::Mean => sum / self.sorted.len() as f64,
            AggregateOp::Sum => sum,
            AggregateOp::Min => first,
            AggregateOp::Max => last,
        })
    }
}

/// Groups items by region id, keeping first-appearance order.
fn group_by_region<T: RegionKeyed>(items: &[T]) -> Vec<(&str, Vec<&T>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&T>)> = Vec::new();

    for item in items {
        let key = item.region_id();
        match index.get(key) {
            Some(&idx) => groups[idx].1.push(item),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![item]));
            }
        }
    }
    groups
}

fn ensure_defined(records: &[PointRecord], attribute: &str) -> Result<()> {
    if records.iter().any(|r| r.attributes.contains_key(attribute)) {
        Ok(())
    } else {
        Err(SiteError::UndefinedAggregate {
            attribute: attribute.to_string(),
        })
    }
}

/// Number of records per region.
///
/// ```rust
/// use sitescope_core::{count_by_region, PointRecord};
///
/// let records = vec![
///     PointRecord::new("ZH", 47.37, 8.54),
///     PointRecord::new("ZH", 47.50, 8.72),
///     PointRecord::new("BE", 46.95, 7.45),
/// ];
/// let counts = count_by_region(&records);
/// assert_eq!(counts.len(), 2);
/// assert_eq!((counts[0].region_id.as_str(), counts[0].count), ("ZH", 2));
/// assert_eq!((counts[1].region_id.as_str(), counts[1].count), ("BE", 1));
/// ```
pub fn count_by_region(records: &[PointRecord]) -> Vec<RegionSummary> {
    group_by_region(records)
        .into_iter()
        .map(|(region, members)| RegionSummary {
            count: members.len(),
            ..RegionSummary::new(region)
        })
        .collect()
}

/// Mean of `attribute` per region.
///
/// Records missing the attribute still count towards `count` but are skipped
/// for the mean. Fails with [`SiteError::UndefinedAggregate`] when no record
/// of a non-empty input carries the attribute.
///
/// ```rust
/// use sitescope_core::{mean_by_region, PointRecord};
///
/// let records = vec![
///     PointRecord::new("ZH", 47.37, 8.54).with_attribute("rating", 4.0),
///     PointRecord::new("ZH", 47.50, 8.72).with_attribute("rating", 2.0),
///     PointRecord::new("BE", 46.95, 7.45).with_attribute("rating", 5.0),
/// ];
/// let means = mean_by_region(&records, "rating").unwrap();
/// assert_eq!(means[0].aggregate("rating"), Some(3.0));
/// assert_eq!(means[1].aggregate("rating"), Some(5.0));
/// ```
pub fn mean_by_region(records: &[PointRecord], attribute: &str) -> Result<Vec<RegionSummary>> {
    aggregate_by_region(records, attribute, AggregateOp::Mean)
}

/// Generalized form of [`mean_by_region`] for any [`AggregateOp`].
pub fn aggregate_by_region(
    records: &[PointRecord],
    attribute: &str,
    op: AggregateOp,
) -> Result<Vec<RegionSummary>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    ensure_defined(records, attribute)?;

    let summaries = group_by_region(records)
        .into_iter()
        .map(|(region, members)| {
            let values = GroupValues::collect(&members, attribute);
            let mut summary = RegionSummary {
                count: members.len(),
                ..RegionSummary::new(region)
            };
            if let Some(value) = values.finish(op) {
                summary.aggregates.insert(attribute.to_string(), value);
            }
            summary
        })
        .collect();
    Ok(summaries)
}

/// Count plus the mean of each listed attribute, in one pass per region.
///
/// Fails on the first attribute (in the given order) that no record carries.
pub fn summarize_by_region(
    records: &[PointRecord],
    attributes: &[&str],
) -> Result<Vec<RegionSummary>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    for attribute in attributes {
        ensure_defined(records, attribute)?;
    }

    let summaries = group_by_region(records)
        .into_iter()
        .map(|(region, members)| {
            let mut summary = RegionSummary {
                count: members.len(),
                ..RegionSummary::new(region)
            };
            for &attribute in attributes {
                let values = GroupValues::collect(&members, attribute);
                if let Some(mean) = values.finish(AggregateOp::Mean) {
                    summary.aggregates.insert(attribute.to_string(), mean);
                }
            }
            summary
        })
        .collect();
    Ok(summaries)
}

/// Copies `records` with every region id passed through
/// [`normalize_region_id`].
pub fn normalize_records(records: &[PointRecord], table: &RegionTable) -> Vec<PointRecord> {
    records
        .iter()
        .map(|r| PointRecord {
            region_id: normalize_region_id(&r.region_id, table),
            ..r.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(region: &str, rating: f64) -> PointRecord {
        PointRecord::new(region, 0.0, 0.0).with_attribute("rating", rating)
    }

    fn sample() -> Vec<PointRecord> {
        vec![rated("ZH", 4.0), rated("ZH", 2.0), rated("BE", 5.0)]
    }

    #[test]
    fn counts_follow_first_appearance() {
        let counts = count_by_region(&sample());
        let got: Vec<(&str, usize)> = counts
            .iter()
            .map(|s| (s.region_id.as_str(), s.count))
            .collect();
        assert_eq!(got, vec![("ZH", 2), ("BE", 1)]);
        assert!(counts.iter().all(|s| s.aggregates.is_empty()));
    }

    #[test]
    fn means_match_worked_example() {
        let means = mean_by_region(&sample(), "rating").unwrap();
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].region_id, "ZH");
        assert_eq!(means[0].aggregate("rating"), Some(3.0));
        assert_eq!(means[1].region_id, "BE");
        assert_eq!(means[1].aggregate("rating"), Some(5.0));
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(count_by_region(&[]).is_empty());
        assert!(mean_by_region(&[], "rating").unwrap().is_empty());
        assert!(summarize_by_region(&[], &["rating"]).unwrap().is_empty());
    }

    #[test]
    fn attribute_missing_everywhere_is_undefined() {
        let err = mean_by_region(&sample(), "revenue").unwrap_err();
        match err {
            SiteError::UndefinedAggregate { attribute } => assert_eq!(attribute, "revenue"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn records_without_attribute_are_counted_but_skipped() {
        let mut records = sample();
        records.push(PointRecord::new("ZH", 0.0, 0.0));
        records.push(PointRecord::new("GE", 0.0, 0.0));

        let means = mean_by_region(&records, "rating").unwrap();
        let zh = means.iter().find(|s| s.region_id == "ZH").unwrap();
        assert_eq!(zh.count, 3);
        assert_eq!(zh.aggregate("rating"), Some(3.0));

        let ge = means.iter().find(|s| s.region_id == "GE").unwrap();
        assert_eq!(ge.count, 1);
        assert_eq!(ge.aggregate("rating"), None);
    }

    #[test]
    fn mean_is_exactly_order_invariant_for_inexact_values() {
        let mut records = vec![rated("ZH", 0.1), rated("ZH", 0.2), rated("ZH", 0.3)];
        let forward = mean_by_region(&records, "rating").unwrap()[0]
            .aggregate("rating")
            .unwrap();
        for _ in 0..records.len() {
            records.rotate_left(1);
            let rotated = mean_by_region(&records, "rating").unwrap()[0]
                .aggregate("rating")
                .unwrap();
            assert_eq!(forward.to_bits(), rotated.to_bits());
        }
        records.reverse();
        let summary = summarize_by_region(&records, &["rating"]).unwrap();
        assert_eq!(summary[0].aggregate("rating").unwrap().to_bits(), forward.to_bits());
    }

    #[test]
    fn other_ops() {
        let records = sample();
        let sums = aggregate_by_region(&records, "rating", AggregateOp::Sum).unwrap();
        assert_eq!(sums[0].aggregate("rating"), Some(6.0));
        let mins = aggregate_by_region(&records, "rating", AggregateOp::Min).unwrap();
        assert_eq!(mins[0].aggregate("rating"), Some(2.0));
        let maxs = aggregate_by_region(&records, "rating", AggregateOp::Max).unwrap();
        assert_eq!(maxs[0].aggregate("rating"), Some(4.0));
    }

    #[test]
    fn op_parsing() {
        assert_eq!("AVG".parse::<AggregateOp>(), Ok(AggregateOp::Mean));
        assert_eq!(" max ".parse::<AggregateOp>(), Ok(AggregateOp::Max));
        assert!("median".parse::<AggregateOp>().is_err());
        assert_eq!(AggregateOp::Sum.to_string(), "sum");
    }

    #[test]
    fn summarize_reports_first_undefined_attribute() {
        let err = summarize_by_region(&sample(), &["rating", "size", "revenue"]).unwrap_err();
        assert!(matches!(err, SiteError::UndefinedAggregate { attribute } if attribute == "size"));
    }

    #[test]
    fn summarize_collects_several_means() {
        let records = vec![
            rated("ZH", 4.0).with_attribute("size", 100.0),
            rated("ZH", 2.0),
            rated("BE", 5.0).with_attribute("size", 300.0),
        ];
        let out = summarize_by_region(&records, &["rating", "size"]).unwrap();
        assert_eq!(out[0].count, 2);
        assert_eq!(out[0].aggregate("rating"), Some(3.0));
        assert_eq!(out[0].aggregate("size"), Some(100.0));
        assert_eq!(out[1].aggregate("size"), Some(300.0));
    }

    #[test]
    fn normalizing_merges_code_and_name_groups() {
        let records = vec![rated("ZH", 4.0), rated("Zürich", 2.0), rated("XX", 1.0)];
        let normalized = normalize_records(&records, RegionTable::swiss_cantons());
        let counts = count_by_region(&normalized);
        let got: Vec<(&str, usize)> = counts
            .iter()
            .map(|s| (s.region_id.as_str(), s.count))
            .collect();
        assert_eq!(got, vec![("Zürich", 2), ("XX", 1)]);
    }
}
