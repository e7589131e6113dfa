//! The discovered-test aggregate and its ancestor hierarchy.
//!
//! Parents are keyed by `(root, id)` in an explicit map, so the same
//! relative id under two collection roots never collides and re-adding an
//! ancestor is a no-op. Tests keep discovery order; parents are exposed
//! sorted for stable output.

use std::collections::HashMap;

use super::error::HierarchyError;
use super::info::{ParentInfo, ParentKind, TestInfo, TestPath};
use super::paths::PathNormalizer;

/// Lazily built hierarchy of folder/file/suite/function nodes.
#[derive(Debug, Clone)]
pub struct ParentTree {
    parents: HashMap<(String, String), ParentInfo>,
    normalizer: PathNormalizer,
}

impl ParentTree {
    pub fn new(normalizer: PathNormalizer) -> Self {
        Self {
            parents: HashMap::new(),
            normalizer,
        }
    }

    pub fn clear(&mut self) {
        self.parents.clear();
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// All parent records across all roots, sorted by `(root, id)` (the
    /// synthetic root nodes sort by their name, the root directory).
    pub fn sorted(&self) -> Vec<ParentInfo> {
        let mut parents: Vec<ParentInfo> = self.parents.values().cloned().collect();
        parents.sort_by(|a, b| {
            let a_key = (a.root.as_deref().unwrap_or(&a.name), a.id.as_str());
            let b_key = (b.root.as_deref().unwrap_or(&b.name), b.id.as_str());
            a_key.cmp(&b_key)
        });
        parents
    }

    /// Create every missing ancestor of a test and hand back its parent id.
    ///
    /// `suite_ids` come outermost-first, matching the dotted suite path in
    /// `path.func`.
    pub fn ensure_ancestors(
        &mut self,
        path: &TestPath,
        parent_id: &str,
        suite_ids: &[String],
    ) -> Result<String, HierarchyError> {
        let parent_id = self.normalizer.root_join(parent_id);
        let file_id = self.ensure_file(&path.root, &path.relfile)?;

        let (full_suite, function_name) = match path.func.as_deref() {
            Some(func) => match func.rsplit_once('.') {
                Some((suites, name)) => (suites, name),
                None => ("", func),
            },
            None => ("", ""),
        };
        let suite_id = self.ensure_suites(full_suite, &path.root, &file_id, suite_ids)?;
        let nearest = suite_id.unwrap_or_else(|| file_id.clone());

        if path.sub.is_some() {
            // Parameter cases group under a function node of their own.
            self.ensure(
                &path.root,
                parent_id.clone(),
                ParentKind::Function,
                function_name,
                Some(nearest),
            )?;
        } else if nearest != parent_id {
            return Err(HierarchyError::ParentMismatch {
                declared: parent_id,
                computed: nearest,
            });
        }
        Ok(parent_id)
    }

    fn ensure_file(&mut self, root: &str, relfile: &str) -> Result<String, HierarchyError> {
        self.ensure_root(root);

        let file_id = self.normalizer.root_join(relfile);
        let (folder_id, file_base) = self.normalizer.split_id(&file_id);
        self.ensure(
            root,
            file_id.clone(),
            ParentKind::File,
            &file_base,
            Some(folder_id.clone()),
        )?;

        let mut folder_id = folder_id;
        while folder_id != "." {
            let (parent_id, name) = self.normalizer.split_id(&folder_id);
            self.ensure(
                root,
                folder_id.clone(),
                ParentKind::Folder,
                &name,
                Some(parent_id.clone()),
            )?;
            folder_id = parent_id;
        }
        Ok(file_id)
    }

    fn ensure_suites(
        &mut self,
        full_suite: &str,
        root: &str,
        file_id: &str,
        suite_ids: &[String],
    ) -> Result<Option<String>, HierarchyError> {
        if full_suite.is_empty() {
            if !suite_ids.is_empty() {
                return Err(HierarchyError::SuiteChainMismatch {
                    file_id: file_id.to_string(),
                    expected: 0,
                    actual: suite_ids.len(),
                });
            }
            return Ok(None);
        }

        let names: Vec<&str> = full_suite.split('.').collect();
        if suite_ids.len() != names.len() {
            return Err(HierarchyError::SuiteChainMismatch {
                file_id: file_id.to_string(),
                expected: names.len(),
                actual: suite_ids.len(),
            });
        }

        let mut parent_id = file_id.to_string();
        for (name, raw_id) in names.iter().zip(suite_ids) {
            let suite_id = self.normalizer.root_join(raw_id);
            self.ensure(
                root,
                suite_id.clone(),
                ParentKind::Suite,
                name,
                Some(parent_id),
            )?;
            parent_id = suite_id;
        }
        Ok(Some(parent_id))
    }

    /// The synthetic per-root folder node carries the root directory as its
    /// name and belongs to no root or parent itself.
    fn ensure_root(&mut self, root: &str) {
        let key = (root.to_string(), ".".to_string());
        self.parents.entry(key).or_insert_with(|| ParentInfo {
            id: ".".to_string(),
            kind: ParentKind::Folder,
            name: root.to_string(),
            root: None,
            parent_id: None,
        });
    }

    fn ensure(
        &mut self,
        root: &str,
        id: String,
        kind: ParentKind,
        name: &str,
        parent_id: Option<String>,
    ) -> Result<(), HierarchyError> {
        let key = (root.to_string(), id.clone());
        if let Some(existing) = self.parents.get(&key) {
            if existing.kind != kind {
                return Err(HierarchyError::KindConflict {
                    id,
                    existing: existing.kind,
                    requested: kind,
                });
            }
            return Ok(());
        }
        self.parents.insert(
            key,
            ParentInfo {
                id,
                kind,
                name: name.to_string(),
                root: Some(root.to_string()),
                parent_id,
            },
        );
        Ok(())
    }
}

/// The full result of one discovery pass: tests in first-discovered order
/// plus the deduplicated ancestor map.
#[derive(Debug, Clone)]
pub struct DiscoveredTests {
    tests: Vec<TestInfo>,
    tree: ParentTree,
}

impl DiscoveredTests {
    pub fn new(normalizer: PathNormalizer) -> Self {
        Self {
            tests: Vec::new(),
            tree: ParentTree::new(normalizer),
        }
    }

    /// Drop all state at the start of a discovery pass.
    pub fn reset(&mut self) {
        self.tests.clear();
        self.tree.clear();
    }

    /// Record one test, creating whatever ancestors it still needs.
    ///
    /// The test id and parent id are canonicalized to carry the `.` +
    /// separator marker; `path.relfile` is stored as given.
    pub fn add_test(
        &mut self,
        mut test: TestInfo,
        suite_ids: &[String],
    ) -> Result<(), HierarchyError> {
        test.parent_id = self
            .tree
            .ensure_ancestors(&test.path, &test.parent_id, suite_ids)?;
        test.id = self.tree.normalizer.root_join(&test.id);
        self.tests.push(test);
        Ok(())
    }

    /// Sorted read view over the ancestor records of every root.
    pub fn parents(&self) -> Vec<ParentInfo> {
        self.tree.sorted()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TestInfo> {
        self.tests.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestInfo> {
        self.tests.iter()
    }

    pub fn tests(&self) -> &[TestInfo] {
        &self.tests
    }

    pub fn into_tests(self) -> Vec<TestInfo> {
        self.tests
    }
}
