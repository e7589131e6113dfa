//! Ties the CLI surface to the collection driver: loads the framework's
//! record stream, applies the start-dir/pattern filter and hands the rest to
//! `collection::run_discovery`.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::cli::DiscoverArgs;
use crate::collection::{run_discovery, DiscoveryError, DiscoveryReport, ItemRecord, PathNormalizer};
use crate::config::{read_discovery_config, DEFAULT_FILE_PATTERN};

/// Run one discovery pass as described by the CLI arguments.
pub fn discover(args: &DiscoverArgs) -> Result<DiscoveryReport, DiscoveryError> {
    let start_dir = fs::canonicalize(&args.start_dir)?;
    let root_dir = match &args.top_level_dir {
        Some(dir) => fs::canonicalize(dir)?,
        None => start_dir.clone(),
    };

    let config = read_discovery_config(&root_dir);
    let pattern = args
        .pattern
        .clone()
        .or(config.pattern)
        .unwrap_or_else(|| DEFAULT_FILE_PATTERN.to_string());
    let pattern = glob::Pattern::new(&pattern)?;
    let normalizer = match config.case_insensitive {
        Some(insensitive) => PathNormalizer::new(std::path::MAIN_SEPARATOR, !insensitive),
        None => PathNormalizer::native(),
    };

    let records = read_records(&args.input)?;
    let total = records.len();
    let selected: Vec<ItemRecord> = records
        .into_iter()
        .filter(|record| selects(record, &start_dir, &pattern, &normalizer))
        .collect();
    if selected.len() < total {
        log::debug!(
            "{} of {} records fall outside '{}' or do not match '{}'",
            total - selected.len(),
            total,
            start_dir.display(),
            pattern
        );
    }

    let root = root_dir.to_string_lossy().into_owned();
    run_discovery(&root, &selected, args.exit_code, normalizer)
}

/// Load item records from a JSON file, or from stdin when `input` is `-`.
fn read_records(input: &str) -> Result<Vec<ItemRecord>, DiscoveryError> {
    let contents = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&contents)?)
}

/// Whether a record's file lives under the start directory and matches the
/// file-name pattern.
fn selects(
    record: &ItemRecord,
    start_dir: &Path,
    pattern: &glob::Pattern,
    normalizer: &PathNormalizer,
) -> bool {
    let file = normalizer.normcase(&record.file);
    let basename = match file.rfind(normalizer.sep()) {
        Some(idx) => &file[idx + 1..],
        None => file.as_str(),
    };
    if !pattern.matches(basename) {
        return false;
    }

    let start = normalizer.normcase(&start_dir.to_string_lossy());
    let start = start.trim_end_matches(normalizer.sep());
    // A relative path cannot contradict the start directory.
    !normalizer.is_absolute(&file) || file.starts_with(&format!("{start}{}", normalizer.sep()))
}
