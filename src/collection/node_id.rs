//! Parsing of framework-native node ids.
//!
//! A node id is `<file>::<suite>::...::<function>[<parameters>]` where the
//! parameter suffix is optional and may itself contain nested or adjacent
//! bracket groups. The bracket scan counts depth explicitly instead of
//! re-partitioning the string, so malformed ids degrade to a parse error
//! rather than a silent mis-split.

use super::error::ParseError;

const SEGMENT_DELIMITER: &str = "::";

/// The structured parts of a node id.
///
/// `suite_ids` are cumulative prefixes, outermost suite first, built on the
/// raw file segment; synthetic `()` segments and empty segments are dropped
/// from both the names and the ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNodeId {
    pub file_id: String,
    pub suite_names: Vec<String>,
    pub suite_ids: Vec<String>,
    pub function_name: String,
    pub function_id: String,
    pub parameterized: Option<String>,
}

/// Parse a raw node id into its file, suite chain, function and parameter
/// suffix.
pub fn parse(node_id: &str) -> Result<ParsedNodeId, ParseError> {
    let (function_id_raw, parameterized) = split_parameter_suffix(node_id)?;

    let (parent_raw, function_name) = function_id_raw
        .rsplit_once(SEGMENT_DELIMITER)
        .ok_or_else(|| ParseError::MissingFunctionSegment {
            node_id: node_id.to_string(),
        })?;
    if function_name.is_empty() || parent_raw.is_empty() {
        return Err(ParseError::MissingFunctionSegment {
            node_id: node_id.to_string(),
        });
    }

    let mut segments = parent_raw.split(SEGMENT_DELIMITER);
    let file_id = segments.next().unwrap_or_default().to_string();

    let mut suite_names = Vec::new();
    let mut suite_ids = Vec::new();
    let mut prefix = file_id.clone();
    for segment in segments {
        if segment.is_empty() || segment == "()" {
            // Synthetic scope markers carry no suite of their own.
            continue;
        }
        prefix = format!("{prefix}{SEGMENT_DELIMITER}{segment}");
        suite_names.push(segment.to_string());
        suite_ids.push(prefix.clone());
    }

    let function_id = format!("{prefix}{SEGMENT_DELIMITER}{function_name}");

    Ok(ParsedNodeId {
        file_id,
        suite_names,
        suite_ids,
        function_name: function_name.to_string(),
        function_id,
        parameterized: parameterized.map(str::to_string),
    })
}

/// Split a trailing parameterization suffix off a node id.
///
/// Scans right-to-left counting bracket depth; once a group balances, an
/// immediately preceding `]` pulls the previous group in as well, so
/// `test[x][y]` keeps `[x][y]` whole. An id ending in `]` whose brackets
/// never balance is an error.
fn split_parameter_suffix(node_id: &str) -> Result<(&str, Option<&str>), ParseError> {
    if !node_id.ends_with(']') {
        return Ok((node_id, None));
    }

    let bytes = node_id.as_bytes();
    let mut depth = 0usize;
    let mut idx = bytes.len();
    while idx > 0 {
        idx -= 1;
        match bytes[idx] {
            b']' => depth += 1,
            b'[' => {
                depth -= 1;
                if depth == 0 && (idx == 0 || bytes[idx - 1] != b']') {
                    return Ok((&node_id[..idx], Some(&node_id[idx..])));
                }
            }
            _ => {}
        }
    }
    Err(ParseError::UnbalancedBracket {
        node_id: node_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_function() {
        let parsed = parse("test_spam.py::test_all").unwrap();
        assert_eq!(parsed.file_id, "test_spam.py");
        assert!(parsed.suite_names.is_empty());
        assert!(parsed.suite_ids.is_empty());
        assert_eq!(parsed.function_name, "test_all");
        assert_eq!(parsed.function_id, "test_spam.py::test_all");
        assert_eq!(parsed.parameterized, None);
    }

    #[test]
    fn test_suite_chain_is_outermost_first() {
        let parsed = parse("x/y/test_eggs.py::A::B::C::test_x").unwrap();
        assert_eq!(parsed.file_id, "x/y/test_eggs.py");
        assert_eq!(parsed.suite_names, vec!["A", "B", "C"]);
        assert_eq!(
            parsed.suite_ids,
            vec![
                "x/y/test_eggs.py::A",
                "x/y/test_eggs.py::A::B",
                "x/y/test_eggs.py::A::B::C",
            ]
        );
        assert_eq!(parsed.function_name, "test_x");
        assert_eq!(parsed.function_id, "x/y/test_eggs.py::A::B::C::test_x");
    }

    #[test]
    fn test_simple_parameter_suffix() {
        let parsed = parse("test_spam.py::test_each[10-10]").unwrap();
        assert_eq!(parsed.function_name, "test_each");
        assert_eq!(parsed.function_id, "test_spam.py::test_each");
        assert_eq!(parsed.parameterized.as_deref(), Some("[10-10]"));
    }

    #[test]
    fn test_nested_brackets_are_kept_whole() {
        let parsed = parse("test_eggs.py::SpamTests::test_spam[a-[b]-c]").unwrap();
        assert_eq!(parsed.function_name, "test_spam");
        assert_eq!(parsed.parameterized.as_deref(), Some("[a-[b]-c]"));
        assert_eq!(parsed.function_id, "test_eggs.py::SpamTests::test_spam");
    }

    #[test]
    fn test_adjacent_bracket_groups_are_kept_whole() {
        let parsed = parse("test_spam.py::test_each[x][y]").unwrap();
        assert_eq!(parsed.function_name, "test_each");
        assert_eq!(parsed.parameterized.as_deref(), Some("[x][y]"));
    }

    #[test]
    fn test_delimiter_inside_brackets_is_not_a_segment() {
        let parsed = parse("test_spam.py::test_each[a::b]").unwrap();
        assert_eq!(parsed.function_name, "test_each");
        assert_eq!(parsed.parameterized.as_deref(), Some("[a::b]"));
        assert!(parsed.suite_names.is_empty());
    }

    #[test]
    fn test_synthetic_scope_segments_are_dropped() {
        let parsed = parse("test_eggs.py::SpamTests::()::()::test_spam").unwrap();
        assert_eq!(parsed.suite_names, vec!["SpamTests"]);
        assert_eq!(parsed.suite_ids, vec!["test_eggs.py::SpamTests"]);
        assert_eq!(parsed.function_id, "test_eggs.py::SpamTests::test_spam");
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        let parsed = parse("test_eggs.py::SpamTests::::test_spam").unwrap();
        assert_eq!(parsed.suite_names, vec!["SpamTests"]);
    }

    #[test]
    fn test_missing_function_segment() {
        assert_eq!(
            parse("test_spam.py"),
            Err(ParseError::MissingFunctionSegment {
                node_id: "test_spam.py".into()
            })
        );
        assert_eq!(
            parse("test_spam.py::"),
            Err(ParseError::MissingFunctionSegment {
                node_id: "test_spam.py::".into()
            })
        );
    }

    #[test]
    fn test_unbalanced_trailing_bracket() {
        assert_eq!(
            parse("test_spam.py::test_each-c]"),
            Err(ParseError::UnbalancedBracket {
                node_id: "test_spam.py::test_each-c]".into()
            })
        );
    }

    #[test]
    fn test_bracket_in_file_name_without_suffix() {
        let parsed = parse("test_[unit].py::test_spam").unwrap();
        assert_eq!(parsed.file_id, "test_[unit].py");
        assert_eq!(parsed.parameterized, None);
    }
}
