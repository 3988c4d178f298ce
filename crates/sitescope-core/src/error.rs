// crates/sitescope-core/src/error.rs
use thiserror::Error;

/// Errors produced by the aggregator and its loaders.
#[derive(Debug, Error)]
pub enum SiteError {
    /// The requested attribute is carried by no record of the input, so the
    /// aggregate has no defined value.
    #[error("undefined aggregate: no record carries attribute '{attribute}'")]
    UndefinedAggregate { attribute: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("column '{column}' not found in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("invalid value '{value}' for column '{column}' on line {line}")]
    InvalidValue {
        column: String,
        value: String,
        line: u64,
    },

    #[error("invalid geometry for region '{region}': {reason}")]
    InvalidGeometry { region: String, reason: String },

    #[error("unsupported input: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "json")]
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, SiteError>;
