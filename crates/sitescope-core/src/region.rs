// crates/sitescope-core/src/region.rs

//! # Region table
//!
//! The fixed code -> name table used to normalize region identifiers. Source
//! files disagree on whether a canton is written `ZH` or `Zürich`; every
//! summary is keyed by the full name so it lines up with the boundary file.

use crate::text::fold_key;
use crate::traits::NameMatch;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The 26 Swiss cantons, ordered by code.
const SWISS_CANTONS: [(&str, &str); 26] = [
    ("AG", "Aargau"),
    ("AI", "Appenzell Innerrhoden"),
    ("AR", "Appenzell Ausserrhoden"),
    ("BE", "Bern"),
    ("BL", "Basel-Landschaft"),
    ("BS", "Basel-Stadt"),
    ("FR", "Fribourg"),
    ("GE", "Genève"),
    ("GL", "Glarus"),
    ("GR", "Graubünden"),
    ("JU", "Jura"),
    ("LU", "Luzern"),
    ("NE", "Neuchâtel"),
    ("NW", "Nidwalden"),
    ("OW", "Obwalden"),
    ("SG", "St. Gallen"),
    ("SH", "Schaffhausen"),
    ("SO", "Solothurn"),
    ("SZ", "Schwyz"),
    ("TG", "Thurgau"),
    ("TI", "Ticino"),
    ("UR", "Uri"),
    ("VD", "Vaud"),
    ("VS", "Valais"),
    ("ZG", "Zug"),
    ("ZH", "Zürich"),
];

// Built once per process.
static SWISS_TABLE: Lazy<RegionTable> = Lazy::new(|| RegionTable::from_pairs(SWISS_CANTONS));

/// One row of a [`RegionTable`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub code: String,
    pub name: String,
}

impl NameMatch for RegionEntry {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Code -> full name lookup table.
#[derive(Clone, Debug, Default)]
pub struct RegionTable {
    entries: Vec<RegionEntry>,
    by_code: HashMap<String, usize>,
}

impl RegionTable {
    /// The process-wide Swiss canton table.
    pub fn swiss_cantons() -> &'static RegionTable {
        &SWISS_TABLE
    }

    /// Builds a table from `(code, name)` pairs. A repeated code keeps its
    /// last name.
    pub fn from_pairs<I, C, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let mut table = RegionTable::default();
        for (code, name) in pairs {
            table.insert(code.into(), name.into());
        }
        table
    }

    fn insert(&mut self, code: String, name: String) {
        match self.by_code.get(&code) {
            Some(&idx) => self.entries[idx].name = name,
            None => {
                self.by_code.insert(code.clone(), self.entries.len());
                self.entries.push(RegionEntry { code, name });
            }
        }
    }

    /// Exact full-name lookup (no folding).
    pub fn has_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Exact code lookup.
    pub fn name_for_code(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(code)
            .map(|&idx| self.entries[idx].name.as_str())
    }

    /// Reverse lookup; accent- and case-insensitive ("Zurich" finds `ZH`).
    pub fn code_for_name(&self, name: &str) -> Option<&str> {
        if fold_key(name).is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.is_named(name))
            .map(|e| e.code.as_str())
    }

    /// Entries whose name contains `q` (folded).
    pub fn find_by_substring(&self, q: &str) -> Vec<&RegionEntry> {
        if fold_key(q).is_empty() {
            return Vec::new();
        }
        self.entries.iter().filter(|e| e.name_contains(q)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps a region code to its full name.
///
/// Ids that are not a code in `table` (full names, unknown codes) pass
/// through unchanged. This is a lookup, not a validation.
///
/// ```rust
/// use sitescope_core::{normalize_region_id, RegionTable};
///
/// let table = RegionTable::swiss_cantons();
/// assert_eq!(normalize_region_id("ZH", table), "Zürich");
/// assert_eq!(normalize_region_id("XX", table), "XX");
/// ```
pub fn normalize_region_id(raw_id: &str, table: &RegionTable) -> String {
    table
        .name_for_code(raw_id)
        .map(str::to_string)
        .unwrap_or_else(|| raw_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swiss_table_has_26_unique_codes() {
        let table = RegionTable::swiss_cantons();
        assert_eq!(table.len(), 26);
        assert_eq!(table.name_for_code("GR"), Some("Graubünden"));
        assert_eq!(table.name_for_code("zh"), None);
    }

    #[test]
    fn normalize_is_idempotent() {
        let table = RegionTable::swiss_cantons();
        for raw in ["ZH", "Zürich", "XX", "", "BE", "Bern"] {
            let once = normalize_region_id(raw, table);
            assert_eq!(normalize_region_id(&once, table), once);
        }
    }

    #[test]
    fn reverse_lookup_folds_accents() {
        let table = RegionTable::swiss_cantons();
        assert_eq!(table.code_for_name("zurich"), Some("ZH"));
        assert_eq!(table.code_for_name("GENEVE"), Some("GE"));
        assert_eq!(table.code_for_name("Atlantis"), None);
        assert_eq!(table.code_for_name("  "), None);
        assert!(table.has_name("Zürich"));
        assert!(!table.has_name("zurich"));
    }

    #[test]
    fn substring_search() {
        let table = RegionTable::swiss_cantons();
        let hits: Vec<&str> = table
            .find_by_substring("appenzell")
            .iter()
            .map(|e| e.code.as_str())
            .collect();
        assert_eq!(hits, vec!["AI", "AR"]);
    }

    #[test]
    fn custom_table_last_name_wins() {
        let table = RegionTable::from_pairs([("A", "One"), ("B", "Two"), ("A", "Uno")]);
        assert_eq!(table.len(), 2);
        assert_eq!(normalize_region_id("A", &table), "Uno");
    }
}
