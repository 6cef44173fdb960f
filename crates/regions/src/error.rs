//! Region configuration errors.

use std::path::PathBuf;

use cone_projection::CalibrationError;
use thiserror::Error;

pub type RegionResult<T> = Result<T, RegionConfigError>;

#[derive(Debug, Error)]
pub enum RegionConfigError {
    #[error("Failed to read region file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse region config {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Region '{region}' has an invalid {axis} axis: {source}")]
    Calibration {
        region: String,
        axis: &'static str,
        #[source]
        source: CalibrationError,
    },

    #[error("Region '{region}': {message}")]
    Invalid { region: String, message: String },

    #[error("Duplicate region id: {0}")]
    DuplicateId(String),

    #[error("Region not found: {0}")]
    NotFound(String),
}
