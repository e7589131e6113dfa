//! Error taxonomy for the discovery adapter.
//!
//! Parse and path errors are per-item: they are recorded against the
//! offending item and processing continues. Hierarchy errors indicate id
//! corruption upstream and abort the run.

use super::info::ParentKind;

/// A malformed framework-native node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The id carries no `::` delimiter, so there is no function segment.
    MissingFunctionSegment { node_id: String },
    /// The id ends with `]` but the brackets never balance.
    UnbalancedBracket { node_id: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFunctionSegment { node_id } => {
                write!(f, "node id '{node_id}' has no function segment")
            }
            Self::UnbalancedBracket { node_id } => {
                write!(f, "node id '{node_id}' has an unbalanced trailing bracket")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A reported file path that cannot be expressed relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    OutsideRoot { path: String, root: String },
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutsideRoot { path, root } => {
                write!(f, "reported path '{path}' is not under root '{root}'")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A reason the collector rejected a single item. Recoverable: the item is
/// skipped and recorded, the rest of the batch still goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRejection {
    Parse(ParseError),
    Path(PathError),
    /// The dotted name rebuilt from the node id disagrees with the
    /// framework's own qualified name for the item.
    QualifiedNameMismatch {
        node_id: String,
        expected: String,
        actual: String,
    },
    /// The file segment of the node id disagrees with the reported path.
    FileMismatch {
        node_id: String,
        file_id: String,
        relfile: String,
    },
}

impl std::fmt::Display for ItemRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => err.fmt(f),
            Self::Path(err) => err.fmt(f),
            Self::QualifiedNameMismatch {
                node_id,
                expected,
                actual,
            } => write!(
                f,
                "node id '{node_id}' names '{expected}' but the framework reported '{actual}'"
            ),
            Self::FileMismatch {
                node_id,
                file_id,
                relfile,
            } => write!(
                f,
                "node id '{node_id}' names file '{file_id}' but the reported path resolves to '{relfile}'"
            ),
        }
    }
}

impl std::error::Error for ItemRejection {}

impl From<ParseError> for ItemRejection {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<PathError> for ItemRejection {
    fn from(err: PathError) -> Self {
        Self::Path(err)
    }
}

/// A contract violation while linking ancestors. Fatal: the ids feeding the
/// tree are corrupt, so the whole run aborts with the conflicting id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// The same `(root, id)` was previously created with a different kind.
    KindConflict {
        id: String,
        existing: ParentKind,
        requested: ParentKind,
    },
    /// The suite id chain does not line up with the dotted function path.
    SuiteChainMismatch {
        file_id: String,
        expected: usize,
        actual: usize,
    },
    /// The parent id supplied with a test is not the ancestor the tree
    /// derived for it.
    ParentMismatch { declared: String, computed: String },
}

impl std::fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KindConflict {
                id,
                existing,
                requested,
            } => write!(
                f,
                "node '{id}' already exists as a {existing} but was requested as a {requested}"
            ),
            Self::SuiteChainMismatch {
                file_id,
                expected,
                actual,
            } => write!(
                f,
                "file '{file_id}' came with {actual} suite ids where its dotted name implies {expected}"
            ),
            Self::ParentMismatch { declared, computed } => write!(
                f,
                "test declares parent '{declared}' but its ancestors resolve to '{computed}'"
            ),
        }
    }
}

impl std::error::Error for HierarchyError {}

/// Top-level failure of a discovery run.
#[derive(Debug)]
pub enum DiscoveryError {
    Hierarchy(HierarchyError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Pattern(glob::PatternError),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hierarchy(err) => write!(f, "inconsistent test hierarchy: {err}"),
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Json(err) => write!(f, "malformed item records: {err}"),
            Self::Pattern(err) => write!(f, "invalid file pattern: {err}"),
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hierarchy(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Pattern(err) => Some(err),
        }
    }
}

impl From<HierarchyError> for DiscoveryError {
    fn from(err: HierarchyError) -> Self {
        Self::Hierarchy(err)
    }
}

impl From<std::io::Error> for DiscoveryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DiscoveryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<glob::PatternError> for DiscoveryError {
    fn from(err: glob::PatternError) -> Self {
        Self::Pattern(err)
    }
}
