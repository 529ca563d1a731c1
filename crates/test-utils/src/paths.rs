//! Path utilities for config files and temporary outputs.

use std::path::PathBuf;

use tempfile::TempDir;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    // Start from the test-utils crate manifest dir
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the path to the config directory for a specific crate.
///
/// # Arguments
///
/// * `crate_name` - The name of the crate (e.g., "fixture-gen")
///
/// # Returns
///
/// The path to `crates/{crate_name}/config/`
pub fn crate_config_dir(crate_name: &str) -> PathBuf {
    workspace_root().join("crates").join(crate_name).join("config")
}

/// All `*.yaml` files in a crate's config directory, sorted by name.
pub fn config_files(crate_name: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(crate_config_dir(crate_name))
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

/// A fresh temporary directory and a path for `file_name` inside it.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn temp_output(file_name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(file_name);
    (dir, path)
}
