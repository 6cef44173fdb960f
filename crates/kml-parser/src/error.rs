//! Error types for KMZ/KML reading.

use std::path::PathBuf;

use thiserror::Error;

pub type KmlResult<T> = Result<T, KmlError>;

#[derive(Debug, Error)]
pub enum KmlError {
    #[error("Invalid KMZ archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Malformed KML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Unsupported vector file: {0}")]
    UnsupportedFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
