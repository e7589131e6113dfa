//! Common test utilities and helpers.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use testtree::collection::ItemRecord;

/// Creates a temporary project directory to act as a collection root.
///
/// The returned path is canonicalized so record file paths built from it
/// survive the same canonicalization the CLI layer applies.
#[allow(dead_code)]
pub fn create_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let project_path = temp_dir.path().join("test_project");
    fs::create_dir_all(&project_path).expect("Failed to create project directory");
    let project_path = fs::canonicalize(&project_path).expect("Failed to canonicalize project");
    (temp_dir, project_path)
}

/// Rewrites `/`-separated fixture paths with the platform separator.
#[allow(dead_code)]
pub fn sep(path: &str) -> String {
    path.replace('/', std::path::MAIN_SEPARATOR_STR)
}

/// Builds an item record rooted at `root`, the way a framework's collection
/// hook would report it.
#[allow(dead_code)]
pub fn make_record(
    root: &Path,
    relfile: &str,
    node_id: &str,
    lineno: u32,
    qualified_name: &str,
) -> ItemRecord {
    ItemRecord {
        node_id: node_id.to_string(),
        file: root.join(sep(relfile)).to_string_lossy().into_owned(),
        lineno,
        qualified_name: qualified_name.to_string(),
        own_markers: vec![],
        source_file: None,
    }
}

/// Serializes records into an `items.json` inside the project directory and
/// returns its path.
#[allow(dead_code)]
pub fn write_records(project: &Path, records: &[ItemRecord]) -> PathBuf {
    let path = project.join("items.json");
    let json = serde_json::to_string_pretty(records).expect("Failed to serialize records");
    fs::write(&path, json).expect("Failed to write records file");
    path
}
