//! Structural checks over a flow snapshot.
//!
//! The graph core accepts dangling edges, duplicate ids and cycles without
//! complaint. This module is the separate layer that reports them, for
//! callers that want to warn before saving or refuse to publish a flow.

mod issue;
mod rules;

pub use issue::{LintIssue, Severity};

use crate::graph::FlowSnapshot;
use rules::FlowIndex;
use serde::{Deserialize, Serialize};

/// Toggles for the optional checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintOptions {
    /// Report cycles as errors. Flows may loop by default.
    pub require_acyclic: bool,
    /// Report nodes that no start node leads to.
    pub check_reachability: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            require_acyclic: false,
            check_reachability: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LintReport {
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &LintIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == severity)
            .count()
    }
}

/// Runs every enabled check over `snapshot`.
pub fn lint(snapshot: &FlowSnapshot, options: LintOptions) -> LintReport {
    let index = FlowIndex::new(snapshot);
    let mut issues = Vec::new();

    rules::check_duplicate_ids(&index, &mut issues);
    rules::check_dangling_edges(&index, &mut issues);
    rules::check_start_nodes(&index, &mut issues);
    rules::check_handles(&index, &mut issues);
    if options.check_reachability {
        rules::check_reachability(&index, &mut issues);
    }
    if options.require_acyclic {
        rules::check_cycles(&index, &mut issues);
    }

    tracing::debug!(issues = issues.len(), "linted flow");
    LintReport { issues }
}
