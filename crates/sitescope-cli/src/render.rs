//! Text and JSON views of page results.

use serde::Serialize;
use sitescope_core::{DatasetStats, RegionSummary, RegionTable};
use std::fmt::Write;

/// One dashboard page as emitted by `--format json`.
#[derive(Debug, Serialize)]
pub struct PageReport<'a> {
    pub dataset: &'a str,
    pub source: String,
    pub stats: DatasetStats,
    pub summaries: &'a [RegionSummary],
}

/// One choropleth row: the value that colors a region.
#[derive(Debug, Serialize)]
pub struct ChoroplethRow<'a> {
    pub region: &'a str,
    pub count: usize,
    pub value: Option<f64>,
}

impl<'a> ChoroplethRow<'a> {
    /// `by_count` colors by record count, otherwise by the aggregate named
    /// `value`.
    pub fn of(summary: &'a RegionSummary, value: &str, by_count: bool) -> Self {
        Self {
            region: summary.region_id.as_str(),
            count: summary.count,
            value: if by_count {
                Some(summary.count as f64)
            } else {
                summary.aggregate(value)
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChoroplethReport<'a> {
    pub dataset: &'a str,
    pub value: &'a str,
    pub matched: Vec<ChoroplethRow<'a>>,
    pub unmatched: Vec<ChoroplethRow<'a>>,
    pub uncovered: Vec<&'a str>,
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Aligned table: region, count, then one column per aggregate name.
pub fn summary_table(summaries: &[RegionSummary], columns: &[&str]) -> String {
    let mut header: Vec<String> = vec!["Region".into(), "Count".into()];
    header.extend(columns.iter().map(|c| c.to_string()));

    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            let mut row = vec![s.region_id.clone(), s.count.to_string()];
            row.extend(columns.iter().map(|c| cell(s.aggregate(c))));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let pad = widths[i].saturating_sub(v.chars().count());
                // Region left-aligned, numbers right-aligned.
                if i == 0 {
                    format!("{v}{}", " ".repeat(pad))
                } else {
                    format!("{}{v}", " ".repeat(pad))
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    let total: usize = summaries.iter().map(|s| s.count).sum();
    let _ = writeln!(out, "{} region(s), {} record(s)", summaries.len(), total);
    out
}

/// Text view of a choropleth join: matched rows, then the regions that
/// cannot be drawn and the boundaries without data.
pub fn choropleth_text(report: &ChoroplethReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} by canton ({})", report.dataset, report.value);
    let _ = writeln!(out);

    let width = report
        .matched
        .iter()
        .map(|r| r.region.chars().count())
        .max()
        .unwrap_or(0);
    for r in &report.matched {
        let pad = width - r.region.chars().count();
        let _ = writeln!(out, "  {}{}  {:>10}", r.region, " ".repeat(pad), cell(r.value));
    }
    if !report.unmatched.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Not drawn (no boundary for region id):");
        for r in &report.unmatched {
            let _ = writeln!(out, "  {} ({} record(s))", r.region, r.count);
        }
    }
    if !report.uncovered.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No data: {}", report.uncovered.join(", "));
    }
    out
}

/// Suffix printed after `raw -> name` by `normalize`.
///
/// Exact codes and exact full names need no note. Anything else was passed
/// through unchanged; a folded name match suggests the canonical spelling.
pub fn normalize_note(raw: &str, table: &RegionTable) -> String {
    if table.name_for_code(raw).is_some() || table.has_name(raw) {
        return String::new();
    }
    match table
        .code_for_name(raw)
        .and_then(|code| table.name_for_code(code))
    {
        Some(canonical) => format!("  (passed through; did you mean {canonical}?)"),
        None => "  (unknown region, passed through)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_and_marks_missing_values() {
        let mut zh = RegionSummary::new("Zürich");
        zh.count = 12;
        zh.aggregates.insert("rating".into(), 3.0);
        let mut ge = RegionSummary::new("Genève");
        ge.count = 3;

        let table = summary_table(&[zh, ge], &["rating"]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Region  Count  rating");
        assert_eq!(lines[1], "Zürich     12    3.00");
        assert_eq!(lines[2], "Genève      3       -");
        assert_eq!(lines[3], "2 region(s), 15 record(s)");
    }

    fn summary(region: &str, count: usize, rating: Option<f64>) -> RegionSummary {
        let mut s = RegionSummary::new(region);
        s.count = count;
        if let Some(r) = rating {
            s.aggregates.insert("rating".into(), r);
        }
        s
    }

    #[test]
    fn choropleth_rows_by_count_and_by_attribute() {
        let ge = summary("Genève", 4, None);
        assert_eq!(ChoroplethRow::of(&ge, "count", true).value, Some(4.0));
        assert_eq!(ChoroplethRow::of(&ge, "rating", false).value, None);

        let zh = summary("Zürich", 2, Some(3.5));
        assert_eq!(ChoroplethRow::of(&zh, "rating", false).value, Some(3.5));
    }

    #[test]
    fn choropleth_text_marks_missing_values_and_lists_leftovers() {
        let zh = summary("Zürich", 2, Some(3.5));
        let ge = summary("Genève", 4, None);
        let xx = summary("XX", 1, Some(1.0));
        let report = ChoroplethReport {
            dataset: "Store Locations",
            value: "rating",
            matched: vec![
                ChoroplethRow::of(&zh, "rating", false),
                ChoroplethRow::of(&ge, "rating", false),
            ],
            unmatched: vec![ChoroplethRow::of(&xx, "rating", false)],
            uncovered: vec!["Bern", "Uri"],
        };

        let text = choropleth_text(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Store Locations by canton (rating)");
        assert_eq!(lines[2], "  Zürich        3.50");
        assert_eq!(lines[3], "  Genève           -");
        assert!(text.contains("Not drawn (no boundary for region id):\n  XX (1 record(s))\n"));
        assert!(text.ends_with("No data: Bern, Uri\n"));
    }

    #[test]
    fn choropleth_text_omits_empty_sections() {
        let zh = summary("Zürich", 2, None);
        let report = ChoroplethReport {
            dataset: "Store Locations",
            value: "count",
            matched: vec![ChoroplethRow::of(&zh, "count", true)],
            unmatched: vec![],
            uncovered: vec![],
        };
        let text = choropleth_text(&report);
        assert!(!text.contains("Not drawn"));
        assert!(!text.contains("No data"));
        assert!(text.contains("  Zürich        2.00"));
    }

    #[test]
    fn normalize_note_flags_folded_names_and_unknown_ids() {
        let table = RegionTable::swiss_cantons();
        assert_eq!(normalize_note("ZH", table), "");
        assert_eq!(normalize_note("Zürich", table), "");
        assert_eq!(
            normalize_note("zurich", table),
            "  (passed through; did you mean Zürich?)"
        );
        assert_eq!(normalize_note("XX", table), "  (unknown region, passed through)");
    }
}
