//! Adapter between the framework's collection hooks and the aggregate.
//!
//! The framework drives the two `CollectionHooks` callbacks; everything the
//! collector learns from a record flows through the node-id parser and the
//! path normalizer before it reaches `DiscoveredTests`. Items that cannot be
//! parsed are recorded on the error channel and skipped; hierarchy errors
//! abort the run.

use super::error::{HierarchyError, ItemRejection, ParseError};
use super::info::{ItemRecord, Marker, TestInfo, TestPath};
use super::node_id;
use super::paths::PathNormalizer;
use super::report::{DiscoveryReport, DiscoveryStatus, ItemError};
use super::tree::DiscoveredTests;
use std::collections::BTreeSet;

/// What the framework's qualified name looks like for doctest items.
const DOCTEST_PREFIX: &str = "[doctest] ";

/// The two collection hooks a framework fires during discovery.
///
/// `on_collection_finished` exists as a fallback: implementations only act
/// on it when the incremental hook never fired.
pub trait CollectionHooks {
    fn on_item_collected(&mut self, record: &ItemRecord);
    fn on_collection_finished(&mut self, records: &[ItemRecord]);
}

/// Collects framework item records into a `DiscoveredTests` aggregate.
pub struct TestCollector {
    root: String,
    normalizer: PathNormalizer,
    discovered: DiscoveredTests,
    errors: Vec<ItemError>,
    fatal: Option<HierarchyError>,
    started: bool,
    processed: usize,
}

impl TestCollector {
    pub fn new(root: impl Into<String>, normalizer: PathNormalizer) -> Self {
        Self {
            root: root.into(),
            normalizer,
            discovered: DiscoveredTests::new(normalizer),
            errors: Vec::new(),
            fatal: None,
            started: false,
            processed: 0,
        }
    }

    /// Drop all state at the start of a discovery pass.
    pub fn reset(&mut self) {
        self.discovered.reset();
        self.errors.clear();
        self.fatal = None;
        self.started = false;
        self.processed = 0;
    }

    pub fn discovered(&self) -> &DiscoveredTests {
        &self.discovered
    }

    pub fn errors(&self) -> &[ItemError] {
        &self.errors
    }

    /// Materialize the result of the pass, folding in the framework's exit
    /// code. A hierarchy error recorded during the pass aborts here.
    pub fn into_report(self, exit_code: i32) -> Result<DiscoveryReport, HierarchyError> {
        if let Some(err) = self.fatal {
            return Err(err);
        }
        let status = if exit_code != 0 && self.discovered.is_empty() {
            DiscoveryStatus::Error
        } else {
            DiscoveryStatus::Success
        };
        let parents = self.discovered.parents();
        Ok(DiscoveryReport {
            status,
            exit_code,
            parents,
            tests: self.discovered.into_tests(),
            errors: self.errors,
        })
    }

    fn process_item(&mut self, record: &ItemRecord) {
        if self.fatal.is_some() {
            return;
        }
        match self.parse_record(record) {
            Ok((test, suite_ids)) => {
                if let Err(err) = self.discovered.add_test(test, &suite_ids) {
                    log::error!("aborting discovery on '{}': {err}", record.node_id);
                    self.fatal = Some(err);
                }
            }
            Err(rejection) => {
                log::warn!("skipping '{}': {rejection}", record.node_id);
                self.errors.push(ItemError {
                    node_id: record.node_id.clone(),
                    message: rejection.to_string(),
                });
            }
        }
    }

    /// Turn one raw record into a test plus its canonical suite id chain.
    fn parse_record(
        &self,
        record: &ItemRecord,
    ) -> Result<(TestInfo, Vec<String>), ItemRejection> {
        let relfile = self.normalizer.relative_file_id(&self.root, &record.file)?;

        if let Some(leaf) = record.qualified_name.strip_prefix(DOCTEST_PREFIX) {
            return self.parse_doctest_record(record, relfile, leaf);
        }

        let parsed = node_id::parse(&record.node_id)?;
        let file_id = self.normalizer.relative_id(&parsed.file_id);
        if file_id != relfile {
            return Err(ItemRejection::FileMismatch {
                node_id: record.node_id.clone(),
                file_id,
                relfile,
            });
        }

        let function = if parsed.suite_names.is_empty() {
            parsed.function_name.clone()
        } else {
            format!(
                "{}.{}",
                parsed.suite_names.join("."),
                parsed.function_name
            )
        };
        let parameterized = parsed.parameterized.as_deref().unwrap_or("");
        let expected = format!("{function}{parameterized}");
        if record.qualified_name != expected {
            return Err(ItemRejection::QualifiedNameMismatch {
                node_id: record.node_id.clone(),
                expected,
                actual: record.qualified_name.clone(),
            });
        }

        // Rebuild canonical ids on the normalized file id so every id the
        // aggregate sees carries the same root marker and case.
        let suite_ids: Vec<String> = parsed
            .suite_names
            .iter()
            .scan(relfile.clone(), |prefix, name| {
                *prefix = format!("{prefix}::{name}");
                Some(prefix.clone())
            })
            .collect();
        let function_id = match suite_ids.last() {
            Some(suite_id) => format!("{suite_id}::{}", parsed.function_name),
            None => format!("{relfile}::{}", parsed.function_name),
        };
        let id = format!("{function_id}{parameterized}");
        let parent_id = if parsed.parameterized.is_some() {
            function_id
        } else if let Some(suite_id) = suite_ids.last() {
            suite_id.clone()
        } else {
            relfile.clone()
        };

        let test = TestInfo {
            id,
            name: format!("{}{parameterized}", parsed.function_name),
            path: TestPath {
                root: self.root.clone(),
                relfile: relfile.clone(),
                func: Some(function),
                sub: parsed.parameterized.map(|sub| vec![sub]),
            },
            source: self.source_of(record, &relfile),
            markers: normalize_markers(&record.own_markers),
            parent_id,
        };
        Ok((test, suite_ids))
    }

    /// Doctest items have no function structure: they hang directly off
    /// their file and always carry an empty marker list.
    fn parse_doctest_record(
        &self,
        record: &ItemRecord,
        relfile: String,
        qualified_leaf: &str,
    ) -> Result<(TestInfo, Vec<String>), ItemRejection> {
        let (file_part, leaf) = record.node_id.rsplit_once("::").ok_or_else(|| {
            ParseError::MissingFunctionSegment {
                node_id: record.node_id.clone(),
            }
        })?;
        if leaf != qualified_leaf {
            return Err(ItemRejection::QualifiedNameMismatch {
                node_id: record.node_id.clone(),
                expected: leaf.to_string(),
                actual: qualified_leaf.to_string(),
            });
        }
        let file_id = self.normalizer.relative_id(file_part);
        if file_id != relfile {
            return Err(ItemRejection::FileMismatch {
                node_id: record.node_id.clone(),
                file_id,
                relfile,
            });
        }

        let test = TestInfo {
            id: format!("{relfile}::{leaf}"),
            name: leaf.to_string(),
            path: TestPath {
                root: self.root.clone(),
                relfile: relfile.clone(),
                func: None,
                sub: None,
            },
            source: self.source_of(record, &relfile),
            markers: Some(Vec::new()),
            parent_id: relfile,
        };
        Ok((test, Vec::new()))
    }

    /// `file:line` of the definition site, 1-based. Tests imported from
    /// another module point at that module, not at the collected file.
    fn source_of(&self, record: &ItemRecord, relfile: &str) -> String {
        let source_file = match record.source_file.as_deref() {
            Some(path) => self.normalizer.relative_id(path),
            None => relfile.to_string(),
        };
        format!("{source_file}:{}", record.lineno + 1)
    }
}

impl CollectionHooks for TestCollector {
    fn on_item_collected(&mut self, record: &ItemRecord) {
        self.started = true;
        self.processed += 1;
        self.process_item(record);
    }

    fn on_collection_finished(&mut self, records: &[ItemRecord]) {
        self.started = true;
        if self.processed > 0 {
            if self.processed != records.len() {
                log::warn!(
                    "collection finished with {} items but {} arrived incrementally",
                    records.len(),
                    self.processed
                );
            }
            return;
        }
        self.discovered.reset();
        self.errors.clear();
        for record in records {
            self.process_item(record);
        }
    }
}

/// Collapse, normalize and sort the framework's marker names.
///
/// `None` when the item carries no supported markers; doctests instead get
/// an explicit empty list.
fn normalize_markers(own_markers: &[String]) -> Option<Vec<Marker>> {
    let markers: BTreeSet<Marker> = own_markers
        .iter()
        .filter_map(|name| Marker::from_framework(name))
        .collect();
    if markers.is_empty() {
        None
    } else {
        Some(markers.into_iter().collect())
    }
}
