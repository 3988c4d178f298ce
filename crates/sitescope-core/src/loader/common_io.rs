// crates/sitescope-core/src/loader/common_io.rs
use crate::error::{Result, SiteError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the name
/// ends in `.gz`. Returns a generic Reader so the parsers don't care about
/// the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        SiteError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }

        #[cfg(not(feature = "compact"))]
        {
            return Err(SiteError::Unsupported(format!(
                "{} is gzip-compressed; enable the 'compact' feature",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Display name for error messages.
pub fn source_name(path: &Path) -> String {
    path.display().to_string()
}
