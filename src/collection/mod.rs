//! Test-discovery adaptation: node-id parsing, path normalization and
//! hierarchy construction.

pub mod collector;
pub mod error;
pub mod info;
pub mod node_id;
pub mod paths;
pub mod report;
pub mod tree;

pub use collector::{CollectionHooks, TestCollector};
pub use error::{DiscoveryError, HierarchyError, ParseError, PathError};
pub use info::{ItemRecord, Marker, ParentInfo, ParentKind, TestInfo, TestPath};
pub use paths::PathNormalizer;
pub use report::{DiscoveryReport, DiscoveryStatus, ItemError};
pub use tree::{DiscoveredTests, ParentTree};

/// Drive one discovery pass over a materialized record stream.
///
/// The records stand in for the framework's collection hooks: each is fed
/// through the incremental hook, then the finished hook fires once with the
/// full list. `exit_code` is whatever the framework's collection process
/// reported.
pub fn run_discovery(
    root: &str,
    records: &[ItemRecord],
    exit_code: i32,
    normalizer: PathNormalizer,
) -> Result<DiscoveryReport, DiscoveryError> {
    let mut collector = TestCollector::new(root, normalizer);
    for record in records {
        collector.on_item_collected(record);
    }
    collector.on_collection_finished(records);
    let report = collector.into_report(exit_code)?;
    log::debug!("{}", report.summarize());
    Ok(report)
}
