//! Canton summary example for sitescope-rs
//!
//! Aggregates a handful of in-memory store records per canton.

use sitescope_core::prelude::*;

fn main() -> Result<()> {
    println!("=== sitescope: canton summary ===\n");

    let stores = vec![
        PointRecord::new("ZH", 47.3769, 8.5417).with_attribute("rating", 4.0),
        PointRecord::new("Zürich", 47.4111, 8.5442).with_attribute("rating", 2.0),
        PointRecord::new("BE", 46.9480, 7.4474).with_attribute("rating", 5.0),
        PointRecord::new("GE", 46.2044, 6.1432),
        PointRecord::new("XX", 45.0, 7.0).with_attribute("rating", 1.0),
    ];

    let table = RegionTable::swiss_cantons();
    let records = normalize_records(&stores, table);

    println!("--- Stores per canton ---");
    for s in count_by_region(&records) {
        println!("  {:<10} {}", s.region_id, s.count);
    }
    println!();

    println!("--- Mean rating per canton ---");
    for s in mean_by_region(&records, "rating")? {
        match s.aggregate("rating") {
            Some(v) => println!("  {:<10} {v:.2}", s.region_id),
            None => println!("  {:<10} no ratings", s.region_id),
        }
    }
    println!();

    println!("--- Undefined aggregate ---");
    match mean_by_region(&records, "footfall") {
        Ok(_) => println!("  unexpected"),
        Err(e) => println!("  {e}"),
    }

    Ok(())
}
