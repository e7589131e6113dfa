//! The materialized result of a discovery pass.

use serde::Serialize;

use super::info::{ParentInfo, TestInfo};

/// Overall outcome of a discovery run.
///
/// Item-level errors never flip a run to `Error` on their own; only a
/// framework invocation that produced nothing does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStatus {
    Success,
    Error,
}

/// A per-item failure surfaced on the error channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemError {
    #[serde(rename = "nodeId")]
    pub node_id: String,
    pub message: String,
}

/// Everything a discovery pass produced, ready for serialization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub status: DiscoveryStatus,
    pub exit_code: i32,
    pub parents: Vec<ParentInfo>,
    pub tests: Vec<TestInfo>,
    pub errors: Vec<ItemError>,
}

impl DiscoveryReport {
    pub fn is_success(&self) -> bool {
        self.status == DiscoveryStatus::Success
    }

    /// One-line human summary for logs.
    pub fn summarize(&self) -> String {
        format!(
            "discovered {} tests under {} parents ({} errors, exit code {})",
            self.tests.len(),
            self.parents.len(),
            self.errors.len(),
            self.exit_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(DiscoveryStatus::Success).unwrap(),
            serde_json::json!("success")
        );
        assert_eq!(
            serde_json::to_value(DiscoveryStatus::Error).unwrap(),
            serde_json::json!("error")
        );
    }

    #[test]
    fn test_report_serialization_shape() {
        let report = DiscoveryReport {
            status: DiscoveryStatus::Success,
            exit_code: 0,
            parents: vec![],
            tests: vec![],
            errors: vec![ItemError {
                node_id: "spam".into(),
                message: "bad".into(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["exitCode"], 0);
        assert_eq!(json["errors"][0]["nodeId"], "spam");
    }

    #[test]
    fn test_summarize_counts_everything() {
        let report = DiscoveryReport {
            status: DiscoveryStatus::Success,
            exit_code: 5,
            parents: vec![],
            tests: vec![],
            errors: vec![],
        };
        assert_eq!(
            report.summarize(),
            "discovered 0 tests under 0 parents (0 errors, exit code 5)"
        );
    }
}
