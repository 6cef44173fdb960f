//! Path utilities for locating workspace files in tests.

use std::path::PathBuf;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the test-utils manifest directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the shipped configuration directory (`config/`).
pub fn config_dir() -> PathBuf {
    workspace_root().join("config")
}

/// Returns the path of a shipped region file, e.g. `config/regions/atlantic.yaml`.
pub fn region_config_path(region_id: &str) -> PathBuf {
    config_dir()
        .join("regions")
        .join(format!("{}.yaml", region_id))
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_is_valid() {
        let root = workspace_root();
        assert!(
            root.join("Cargo.toml").exists(),
            "Workspace root should contain Cargo.toml: {:?}",
            root
        );
    }

    #[test]
    fn test_shipped_region_files_exist() {
        for id in ["atlantic", "eastern-pacific", "central-pacific"] {
            let path = region_config_path(id);
            assert!(path.exists(), "missing region file {:?}", path);
        }
    }
}
