// crates/sitescope-core/src/loader/points.rs
use super::common_io;
use crate::error::{Result, SiteError};
use crate::model::PointRecord;
use crate::text::parse_opt_f64;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Column layout of a point dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsvSchema {
    #[serde(default = "default_region_column")]
    pub region_column: String,
    #[serde(default = "default_latitude_column")]
    pub latitude_column: String,
    #[serde(default = "default_longitude_column")]
    pub longitude_column: String,
    /// Columns read as attributes. `None` reads every other column and keeps
    /// the cells that parse as numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_columns: Option<Vec<String>>,
}

fn default_region_column() -> String {
    "canton".to_string()
}

fn default_latitude_column() -> String {
    "latitude".to_string()
}

fn default_longitude_column() -> String {
    "longitude".to_string()
}

impl Default for CsvSchema {
    fn default() -> Self {
        Self {
            region_column: default_region_column(),
            latitude_column: default_latitude_column(),
            longitude_column: default_longitude_column(),
            attribute_columns: None,
        }
    }
}

/// Loads a point dataset from a CSV file (optionally `.csv.gz`).
pub fn load_points(path: impl AsRef<Path>, schema: &CsvSchema) -> Result<Vec<PointRecord>> {
    let path = path.as_ref();
    let reader = common_io::open_stream(path)?;
    let records = load_points_from_reader(reader, schema, &common_io::source_name(path))?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parses point records from any CSV reader with a header row.
///
/// Latitude and longitude are required on every row. Attribute cells that
/// are empty or non-numeric leave the attribute unset for that record.
pub fn load_points_from_reader<R: Read>(
    reader: R,
    schema: &CsvSchema,
    source_name: &str,
) -> Result<Vec<PointRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let position = |column: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| SiteError::MissingColumn {
                column: column.to_string(),
                source_name: source_name.to_string(),
            })
    };

    let region_idx = position(&schema.region_column)?;
    let lat_idx = position(&schema.latitude_column)?;
    let lon_idx = position(&schema.longitude_column)?;

    let attribute_idx: Vec<(String, usize)> = match &schema.attribute_columns {
        Some(columns) => columns
            .iter()
            .map(|c| position(c).map(|idx| (c.clone(), idx)))
            .collect::<Result<_>>()?,
        None => headers
            .iter()
            .enumerate()
            .filter(|(i, _)| ![region_idx, lat_idx, lon_idx].contains(i))
            .map(|(i, h)| (h.to_string(), i))
            .collect(),
    };
    debug!(
        "{}: region={} lat={} lon={} attributes={:?}",
        source_name,
        region_idx,
        lat_idx,
        lon_idx,
        attribute_idx.iter().map(|(name, _)| name).collect::<Vec<_>>()
    );

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let coordinate = |idx: usize, column: &str| -> Result<f64> {
            let cell = row.get(idx).unwrap_or("");
            parse_opt_f64(cell).ok_or_else(|| SiteError::InvalidValue {
                column: column.to_string(),
                value: cell.to_string(),
                line,
            })
        };

        let latitude = coordinate(lat_idx, &schema.latitude_column)?;
        let longitude = coordinate(lon_idx, &schema.longitude_column)?;

        let attributes: BTreeMap<String, f64> = attribute_idx
            .iter()
            .filter_map(|(name, idx)| {
                row.get(*idx)
                    .and_then(parse_opt_f64)
                    .map(|v| (name.clone(), v))
            })
            .collect();

        records.push(PointRecord {
            region_id: row.get(region_idx).unwrap_or("").to_string(),
            attributes,
            latitude,
            longitude,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORES: &str = "\
name,canton,latitude,longitude,rating
Migros City,ZH,47.3769,8.5417,4
Migros Oerlikon,ZH,47.4111,8.5442,
Migros Bahnhof,BE,46.9480,7.4474,5
";

    #[test]
    fn reads_numeric_attributes_only() {
        let records =
            load_points_from_reader(STORES.as_bytes(), &CsvSchema::default(), "stores").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].region_id, "ZH");
        assert_eq!(records[0].attribute("rating"), Some(4.0));
        // "name" never parses as a number
        assert_eq!(records[0].attribute("name"), None);
        assert_eq!(records[1].attribute("rating"), None);
        assert_eq!(records[2].latitude, 46.9480);
    }

    #[test]
    fn missing_column_is_reported() {
        let schema = CsvSchema {
            region_column: "kanton".into(),
            ..CsvSchema::default()
        };
        let err = load_points_from_reader(STORES.as_bytes(), &schema, "stores").unwrap_err();
        assert!(matches!(err, SiteError::MissingColumn { column, .. } if column == "kanton"));
    }

    #[test]
    fn bad_coordinate_names_the_line() {
        let csv = "canton,latitude,longitude\nZH,47.1,8.5\nBE,north,7.4\n";
        let err = load_points_from_reader(csv.as_bytes(), &CsvSchema::default(), "x").unwrap_err();
        match err {
            SiteError::InvalidValue { column, value, line } => {
                assert_eq!(column, "latitude");
                assert_eq!(value, "north");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn explicit_attribute_columns() {
        let schema = CsvSchema {
            attribute_columns: Some(vec!["rating".into()]),
            ..CsvSchema::default()
        };
        let records = load_points_from_reader(STORES.as_bytes(), &schema, "stores").unwrap();
        assert_eq!(records[2].attributes.len(), 1);
    }
}
