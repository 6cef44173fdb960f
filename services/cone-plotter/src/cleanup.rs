//! Removal of downloaded working files after a run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Files removed by [`cleanup_work_dir`].
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: usize,
}

fn is_vector_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "kmz" || ext == "kml" || ext == "partial"
        })
        .unwrap_or(false)
}

/// Delete cone archives, extracted KML, leftover partial downloads and the
/// named base images from `work_dir`.
///
/// Only the top level is scanned; output images living elsewhere are never
/// touched. A missing work directory is not an error.
pub fn cleanup_work_dir(work_dir: &Path, base_images: &[&str]) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();

    let entries = match std::fs::read_dir(work_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %work_dir.display(), "Work directory does not exist, nothing to clean");
            return Ok(report);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", work_dir.display()));
        }
    };

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read {}", work_dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_base_image = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| base_images.contains(&n))
            .unwrap_or(false);
        if !(is_vector_file(&path) || is_base_image) {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed working file");
                report.removed.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove working file");
                report.failed += 1;
            }
        }
    }

    info!(
        dir = %work_dir.display(),
        removed = report.removed.len(),
        failed = report.failed,
        "Cleaned up working files"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_removes_vector_files_and_base_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "AL052024_CONE_latest.kmz",
            "cone.kml",
            "two_atl_5d0.png",
            "two_pac_5d0.png.partial",
            "atl_latest.png",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.kmz")).unwrap();

        let report = cleanup_work_dir(dir.path(), &["two_atl_5d0.png"]).unwrap();
        assert_eq!(report.removed.len(), 4);
        assert_eq!(report.failed, 0);

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left, vec!["atl_latest.png", "nested.kmz", "notes.txt"]);
    }

    #[test]
    fn test_missing_dir_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let report = cleanup_work_dir(&dir.path().join("gone"), &[]).unwrap();
        assert!(report.removed.is_empty());
    }
}
