//! Optional file-based configuration for discovery defaults.
//!
//! A `testtree.toml` in the collection root can pin the file-name pattern
//! and the case-folding policy; CLI flags take precedence over it.

use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "testtree.toml";
pub const DEFAULT_FILE_PATTERN: &str = "test_*.py";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Glob limiting which reported files are considered.
    pub pattern: Option<String>,
    /// Force case-insensitive path comparison regardless of platform.
    pub case_insensitive: Option<bool>,
}

/// Read the discovery config from the given root, falling back to defaults
/// when the file is missing or unreadable.
pub fn read_discovery_config(root: &Path) -> DiscoveryConfig {
    let path = root.join(CONFIG_FILE);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(_) => return DiscoveryConfig::default(),
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring invalid {}: {err}", path.display());
            DiscoveryConfig::default()
        }
    }
}
