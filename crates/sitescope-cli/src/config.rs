//! Configuration file handling.
//!
//! Loads `sitescope.toml`: where each dataset lives, its column layout, and
//! the boundary file used for choropleths.

use crate::args::DatasetKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sitescope_core::loader::CsvSchema;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "sitescope.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub datasets: DatasetsConfig,

    #[serde(default)]
    pub boundaries: BoundaryConfig,

    #[serde(default)]
    pub regions: RegionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetsConfig {
    #[serde(default = "default_stores")]
    pub stores: DatasetConfig,
    #[serde(default = "default_population")]
    pub population: DatasetConfig,
    #[serde(default = "default_competitors")]
    pub competitors: DatasetConfig,
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            stores: default_stores(),
            population: default_population(),
            competitors: default_competitors(),
        }
    }
}

/// One CSV point dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
    #[serde(flatten)]
    pub schema: CsvSchema,
}

impl DatasetConfig {
    fn at(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
            schema: CsvSchema::default(),
        }
    }
}

fn default_stores() -> DatasetConfig {
    DatasetConfig::at("data/migros_stores.csv")
}

fn default_population() -> DatasetConfig {
    DatasetConfig::at("data/pop_density.csv")
}

fn default_competitors() -> DatasetConfig {
    DatasetConfig::at("data/competitors.csv")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConfig {
    #[serde(default = "default_boundary_path")]
    pub path: PathBuf,
    /// Feature property holding the canton name.
    #[serde(default = "default_id_property")]
    pub id_property: String,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            path: default_boundary_path(),
            id_property: default_id_property(),
        }
    }
}

fn default_boundary_path() -> PathBuf {
    PathBuf::from("data/cantons.geojson")
}

fn default_id_property() -> String {
    "name".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionsConfig {
    /// CSV with `code,name` columns; the built-in canton table when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,
}

impl Config {
    /// Loads `path`, or `./sitescope.toml` when it exists, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    Self::load_from_file(local)
                } else {
                    debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse TOML configuration: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn default_toml() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    pub fn dataset(&self, kind: DatasetKind) -> &DatasetConfig {
        match kind {
            DatasetKind::Stores => &self.datasets.stores,
            DatasetKind::Population => &self.datasets.population,
            DatasetKind::Competitors => &self.datasets.competitors,
        }
    }
}
