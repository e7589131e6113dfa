//! Data model for discovered tests and their ancestor nodes.

use serde::{Deserialize, Serialize};

/// Where a test lives, expressed relative to its collection root.
///
/// `relfile` carries a leading `.` + separator once it has passed through the
/// aggregate; `func` is `None` for items without a function structure
/// (doctests).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestPath {
    pub root: String,
    pub relfile: String,
    pub func: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<Vec<String>>,
}

/// A normalized marker tag attached to a test.
///
/// Variants are declared in the ordering of their serialized names so that
/// sorted marker sets render alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Marker {
    #[serde(rename = "expected-failure")]
    ExpectedFailure,
    #[serde(rename = "skip")]
    Skip,
    #[serde(rename = "skip-if")]
    SkipIf,
}

impl Marker {
    /// Map a framework-native marker name onto a normalized tag.
    ///
    /// Unsupported markers (fixtures, timeouts, custom marks) yield `None`;
    /// parametrization markers are already covered by the id suffix.
    pub fn from_framework(name: &str) -> Option<Self> {
        match name {
            "skip" => Some(Self::Skip),
            "skipif" => Some(Self::SkipIf),
            "xfail" => Some(Self::ExpectedFailure),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExpectedFailure => "expected-failure",
            Self::Skip => "skip",
            Self::SkipIf => "skip-if",
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestInfo {
    pub id: String,
    pub name: String,
    pub path: TestPath,
    /// `file:line` of the definition site, 1-based.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<Marker>>,
    #[serde(rename = "parentid")]
    pub parent_id: String,
}

/// The kind of a node in the ancestor hierarchy.
///
/// `Function` appears only as the grouping node above the individual cases of
/// a parameterized test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    Folder,
    File,
    Suite,
    Function,
}

impl ParentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::Suite => "suite",
            Self::Function => "function",
        }
    }
}

impl std::fmt::Display for ParentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node in the ancestor hierarchy above the individual tests.
///
/// `root` and `parent_id` are `None` only on the synthetic per-root folder
/// node (`id == "."`), whose `name` is the root directory itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentInfo {
    pub id: String,
    pub kind: ParentKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// One collected item as reported by the framework's collection hook.
///
/// `lineno` is 0-based, the way frameworks report it. `source_file` is only
/// present when the definition site differs from the nodeid file (tests
/// imported from another module).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub node_id: String,
    pub file: String,
    pub lineno: u32,
    pub qualified_name: String,
    #[serde(default)]
    pub own_markers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}
