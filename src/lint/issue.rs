use crate::graph::NodeType;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A problem found in a flow snapshot.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "camelCase")]
pub enum LintIssue {
    #[error("Edge '{edge_id}' references missing node '{missing_node_id}'")]
    DanglingEdge {
        edge_id: String,
        missing_node_id: String,
    },

    #[error("Node id '{id}' is used by more than one node")]
    DuplicateNodeId { id: String },

    #[error("Edge id '{id}' is used by more than one edge")]
    DuplicateEdgeId { id: String },

    #[error("Flow has no start node")]
    MissingStartNode,

    #[error("Flow has {count} start nodes")]
    MultipleStartNodes { count: usize },

    #[error("Edge '{edge_id}' connects into start node '{node_id}'")]
    InputIntoStart { edge_id: String, node_id: String },

    #[error("Edge '{edge_id}' leaves end node '{node_id}'")]
    OutputFromEnd { edge_id: String, node_id: String },

    #[error(
        "Edge '{edge_id}' uses handle '{handle}' which {node_type} node '{node_id}' does not have"
    )]
    UnknownSourceHandle {
        edge_id: String,
        node_id: String,
        node_type: NodeType,
        handle: String,
    },

    #[error("Node '{id}' cannot be reached from any start node")]
    UnreachableNode { id: String },

    #[error("Flow contains a cycle through {}", .node_ids.join(" -> "))]
    Cycle { node_ids: Vec<String> },
}

impl LintIssue {
    pub fn severity(&self) -> Severity {
        match self {
            LintIssue::DanglingEdge { .. }
            | LintIssue::DuplicateNodeId { .. }
            | LintIssue::DuplicateEdgeId { .. }
            | LintIssue::Cycle { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}
