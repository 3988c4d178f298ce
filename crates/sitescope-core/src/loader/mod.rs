// crates/sitescope-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and delegates to the
//! specific parsers (CSV points, CSV region tables, GeoJSON boundaries).
//!
//! The `*_cached` functions memoize by source path through a process-wide
//! [`DatasetCache`], so repeated dashboard runs read each file once.

use crate::error::Result;
use crate::model::PointRecord;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod cache;
mod common_io;
mod points;
mod table;

#[cfg(feature = "json")]
mod boundaries;

pub use cache::DatasetCache;
pub use common_io::open_stream;
pub use points::{load_points, load_points_from_reader, CsvSchema};
pub use table::{load_region_table, load_region_table_from_reader};

#[cfg(feature = "json")]
pub use boundaries::{load_boundaries, load_boundaries_from_reader};

/// Cache key of a point dataset: the same file read with a different column
/// layout is a different dataset.
pub type PointSourceKey = (PathBuf, CsvSchema);

static POINT_CACHE: Lazy<DatasetCache<PointSourceKey, Vec<PointRecord>>> =
    Lazy::new(DatasetCache::new);

#[cfg(feature = "json")]
static BOUNDARY_CACHE: Lazy<DatasetCache<(PathBuf, String), Vec<crate::model::RegionBoundary>>> =
    Lazy::new(DatasetCache::new);

/// The process-wide point dataset cache.
pub fn point_cache() -> &'static DatasetCache<PointSourceKey, Vec<PointRecord>> {
    &POINT_CACHE
}

/// [`load_points`] memoized by `(path, schema)`.
pub fn load_points_cached(
    path: impl AsRef<Path>,
    schema: &CsvSchema,
) -> Result<Arc<Vec<PointRecord>>> {
    let path = path.as_ref();
    let key = (path.to_path_buf(), schema.clone());
    POINT_CACHE.get_or_try_load(&key, || load_points(path, schema))
}

/// [`load_boundaries`] memoized by `(path, id_property)`.
#[cfg(feature = "json")]
pub fn load_boundaries_cached(
    path: impl AsRef<Path>,
    id_property: &str,
) -> Result<Arc<Vec<crate::model::RegionBoundary>>> {
    let path = path.as_ref();
    let key = (path.to_path_buf(), id_property.to_string());
    BOUNDARY_CACHE.get_or_try_load(&key, || load_boundaries(path, id_property))
}
