//! Root-relative file id normalization.
//!
//! All platform variation (separator, case folding) is concentrated here
//! behind an injected policy, so the rest of the adapter manipulates ids as
//! plain strings. Ids produced by this module always carry a leading `.` +
//! separator marker.

use super::error::PathError;

/// Separator and case-folding policy for turning reported paths into ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathNormalizer {
    sep: char,
    case_sensitive: bool,
}

impl PathNormalizer {
    pub fn new(sep: char, case_sensitive: bool) -> Self {
        Self {
            sep,
            case_sensitive,
        }
    }

    /// The policy of the platform the adapter is running on.
    pub fn native() -> Self {
        Self::new(std::path::MAIN_SEPARATOR, !cfg!(windows))
    }

    pub fn sep(&self) -> char {
        self.sep
    }

    /// Fold case per policy and unify both separator styles to the
    /// configured one.
    pub fn normcase(&self, path: &str) -> String {
        let unified: String = path
            .chars()
            .map(|c| if c == '/' || c == '\\' { self.sep } else { c })
            .collect();
        if self.case_sensitive {
            unified
        } else {
            unified.to_lowercase()
        }
    }

    /// Express `reported` relative to `root` as a `.`-prefixed file id.
    ///
    /// An absolute path that does not fall under the root is an error; a
    /// path that is already relative is taken as root-relative as-is.
    pub fn relative_file_id(&self, root: &str, reported: &str) -> Result<String, PathError> {
        let root_id = self
            .normcase(root)
            .trim_end_matches(self.sep)
            .to_string();
        let reported_id = self.normcase(reported);

        if !self.is_absolute(&reported_id) {
            return Ok(self.root_join(&reported_id));
        }
        let prefix = format!("{root_id}{}", self.sep);
        match reported_id.strip_prefix(&prefix) {
            Some(rest) if !rest.is_empty() => Ok(self.root_join(rest)),
            _ => Err(PathError::OutsideRoot {
                path: reported.to_string(),
                root: root.to_string(),
            }),
        }
    }

    /// Canonicalize an already root-relative path into a `.`-prefixed id.
    pub fn relative_id(&self, path: &str) -> String {
        self.root_join(&self.normcase(path))
    }

    /// Prefix an id with the `.` + separator marker unless already present.
    pub fn root_join(&self, id: &str) -> String {
        let marker = format!(".{}", self.sep);
        if id.starts_with(&marker) {
            id.to_string()
        } else {
            format!("{marker}{id}")
        }
    }

    /// Split an id into `(parent, basename)` at the last separator.
    ///
    /// `./x/y` becomes `("./x", "y")` and `./x` becomes `(".", "x")`.
    pub fn split_id(&self, id: &str) -> (String, String) {
        match id.rfind(self.sep) {
            Some(idx) => (id[..idx].to_string(), id[idx + 1..].to_string()),
            None => (String::new(), id.to_string()),
        }
    }

    /// Whether a (normalized) path is absolute under this policy: rooted at
    /// the separator or carrying a drive letter.
    pub fn is_absolute(&self, path: &str) -> bool {
        path.starts_with(self.sep) || path.as_bytes().get(1) == Some(&b':')
    }
}
