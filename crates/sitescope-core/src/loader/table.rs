// crates/sitescope-core/src/loader/table.rs
use super::common_io;
use crate::error::Result;
use crate::region::{RegionEntry, RegionTable};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

/// Loads a code -> name table from a CSV with `code` and `name` columns.
pub fn load_region_table(path: impl AsRef<Path>) -> Result<RegionTable> {
    let reader = common_io::open_stream(path.as_ref())?;
    load_region_table_from_reader(reader)
}

pub fn load_region_table_from_reader<R: Read>(reader: R) -> Result<RegionTable> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut pairs = Vec::new();
    for result in rdr.deserialize() {
        let entry: RegionEntry = result?;
        pairs.push((entry.code, entry.name));
    }
    Ok(RegionTable::from_pairs(pairs))
}
