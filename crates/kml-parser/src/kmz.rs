//! KMZ archive reading.
//!
//! A KMZ file is a zip archive holding one or more KML documents (plus
//! optional icons). Only entries ending in `.kml` are returned.

use std::io::{Cursor, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{KmlError, KmlResult};

/// Largest KML entry read from an archive. Cone documents are a few
/// hundred kilobytes.
pub const MAX_KML_ENTRY_BYTES: u64 = 64 * 1024 * 1024;

/// A KML document pulled out of an archive or read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmlDocument {
    /// Entry name inside the archive, or the file name for plain KML.
    pub name: String,
    pub content: String,
}

/// Extract every KML document from KMZ bytes, in archive order.
///
/// An archive with no KML entries is not an error; it yields an empty list.
/// Entries that are larger than [`MAX_KML_ENTRY_BYTES`] or not UTF-8 are
/// skipped with a warning. The declared entry size is never trusted.
pub fn extract_kml_from_kmz(bytes: &[u8]) -> KmlResult<Vec<KmlDocument>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut documents = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if !name.to_ascii_lowercase().ends_with(".kml") {
            debug!(entry = %name, "Skipping non-KML archive entry");
            continue;
        }

        let mut raw = Vec::new();
        (&mut entry)
            .take(MAX_KML_ENTRY_BYTES + 1)
            .read_to_end(&mut raw)?;
        if raw.len() as u64 > MAX_KML_ENTRY_BYTES {
            warn!(entry = %name, limit = MAX_KML_ENTRY_BYTES, "KML entry too large, skipping");
            continue;
        }
        let content = match String::from_utf8(raw) {
            Ok(content) => content,
            Err(e) => {
                warn!(entry = %name, error = %e, "KML entry is not UTF-8, skipping");
                continue;
            }
        };

        debug!(entry = %name, bytes = content.len(), "Extracted KML document");
        documents.push(KmlDocument { name, content });
    }

    if documents.is_empty() {
        warn!(entries = archive.len(), "KMZ archive contains no KML documents");
    }

    Ok(documents)
}

/// Read a `.kmz` or `.kml` file from disk.
pub fn read_vector_file(path: &Path) -> KmlResult<Vec<KmlDocument>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("kmz") => {
            let bytes = std::fs::read(path)?;
            extract_kml_from_kmz(&bytes)
        }
        Some("kml") => {
            let content = std::fs::read_to_string(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(vec![KmlDocument { name, content }])
        }
        _ => Err(KmlError::UnsupportedFile(path.to_path_buf())),
    }
}
