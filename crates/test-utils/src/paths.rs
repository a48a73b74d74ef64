//! Path utilities for locating and staging test data files.

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// Walks up from the test-utils manifest directory (`crates/test-utils`).
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// The workspace-level `data/` directory.
pub fn data_dir() -> PathBuf {
    workspace_root().join("data")
}

/// Path of the sample dataset shipped with the service.
pub fn sample_data_file() -> PathBuf {
    data_dir().join("features.ttl")
}

/// Creates a temporary directory for test output.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write test fixture");
    path
}
